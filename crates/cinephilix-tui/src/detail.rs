//! Detail view state and loaders.

use cinephilix_api::catalog::{CastMember, CatalogApi, CrewMember, Person, Review, Title};

/// Outcome of one detail tab fetch. Errors are display messages.
pub type TabResult<T> = Result<Vec<T>, String>;

/// Cast, crew and reviews of a title, each loaded independently.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleDetails {
    /// Cast tab.
    pub cast: TabResult<CastMember>,
    /// Crew tab.
    pub crew: TabResult<CrewMember>,
    /// Reviews tab.
    pub reviews: TabResult<Review>,
}

/// Fetches cast, crew and reviews concurrently.
///
/// A failing call only affects its own tab; the failure is logged at
/// `warn` and kept as the tab's error message.
pub async fn load_title_details<A: CatalogApi>(api: &A, id: &str) -> TitleDetails {
    let (cast, crew, reviews) = tokio::join!(
        api.title_cast(id),
        api.title_crew(id),
        api.title_reviews(id)
    );
    TitleDetails {
        cast: into_tab("cast", id, cast),
        crew: into_tab("crew", id, crew),
        reviews: into_tab("reviews", id, reviews),
    }
}

/// Fetches a person for the person detail view.
pub async fn load_person(api: &impl CatalogApi, id: &str) -> Result<Person, String> {
    api.person(id).await.map_err(|e| {
        tracing::warn!(person_id = id, error = %format!("{e:#}"), "failed to load person");
        format!("{e:#}")
    })
}

fn into_tab<T>(tab: &'static str, id: &str, result: anyhow::Result<Vec<T>>) -> TabResult<T> {
    result.map_err(|e| {
        let message = format!("{e:#}");
        tracing::warn!(tab, title_id = id, error = %message, "failed to load detail tab");
        message
    })
}

/// Tabs of the title detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    /// Cast list.
    #[default]
    Cast,
    /// Crew list.
    Crew,
    /// User reviews.
    Reviews,
}

impl DetailTab {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [Self::Cast, Self::Crew, Self::Reviews];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cast => "Cast",
            Self::Crew => "Crew",
            Self::Reviews => "Reviews",
        }
    }

    /// Next tab (wraps around).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Cast => Self::Crew,
            Self::Crew => Self::Reviews,
            Self::Reviews => Self::Cast,
        }
    }
}

/// What the detail view is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailSubject {
    /// A title picked from a title page.
    Title {
        /// The selected title as listed.
        title: Box<Title>,
        /// Loaded tabs (`None` while loading).
        details: Option<TitleDetails>,
        /// Visible tab.
        tab: DetailTab,
    },
    /// A person picked from the people page.
    Person {
        /// The selected person as listed.
        listed: Box<Person>,
        /// Fetched record (`None` while loading).
        loaded: Option<Result<Person, String>>,
    },
}

/// A detail fetch the caller must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    /// Sequence number to hand back with the outcome.
    pub seq: u64,
    /// Backend id to load.
    pub id: String,
}

/// Detail overlay state with its own request fencing.
#[derive(Debug, Default)]
pub struct DetailState {
    latest_seq: u64,
    subject: Option<DetailSubject>,
}

impl DetailState {
    /// Currently open subject.
    #[must_use]
    pub const fn subject(&self) -> Option<&DetailSubject> {
        self.subject.as_ref()
    }

    /// Whether the overlay is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.subject.is_some()
    }

    /// Whether the open subject is still loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(
            self.subject,
            Some(
                DetailSubject::Title { details: None, .. }
                    | DetailSubject::Person { loaded: None, .. }
            )
        )
    }

    /// Opens a title and returns the fetch to run.
    pub fn open_title(&mut self, title: Title) -> DetailTicket {
        let id = title.id.clone();
        self.subject = Some(DetailSubject::Title {
            title: Box::new(title),
            details: None,
            tab: DetailTab::default(),
        });
        self.ticket(id)
    }

    /// Opens a person and returns the fetch to run.
    pub fn open_person(&mut self, person: Person) -> DetailTicket {
        let id = person.id.clone();
        self.subject = Some(DetailSubject::Person {
            listed: Box::new(person),
            loaded: None,
        });
        self.ticket(id)
    }

    /// Closes the overlay. Outstanding loads become stale.
    pub fn close(&mut self) {
        self.subject = None;
        self.latest_seq = self.latest_seq.wrapping_add(1);
    }

    /// Switches to the next tab (title detail only).
    pub fn next_tab(&mut self) {
        if let Some(DetailSubject::Title { tab, .. }) = &mut self.subject {
            *tab = tab.next();
        }
    }

    /// Stores loaded title tabs. Returns `false` for a stale load.
    pub fn complete_title(&mut self, seq: u64, loaded: TitleDetails) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale detail response");
            return false;
        }
        match &mut self.subject {
            Some(DetailSubject::Title { details, .. }) => {
                *details = Some(loaded);
                true
            }
            _ => false,
        }
    }

    /// Stores a loaded person. Returns `false` for a stale load.
    pub fn complete_person(&mut self, seq: u64, person: Result<Person, String>) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale detail response");
            return false;
        }
        match &mut self.subject {
            Some(DetailSubject::Person { loaded, .. }) => {
                *loaded = Some(person);
                true
            }
            _ => false,
        }
    }

    /// External URL for the open subject (poster or profile image).
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match self.subject.as_ref()? {
            DetailSubject::Title { title, .. } => title.poster_url.as_deref(),
            DetailSubject::Person { listed, loaded } => loaded
                .as_ref()
                .and_then(|r| r.as_ref().ok())
                .and_then(|p| p.profile_url.as_deref())
                .or(listed.profile_url.as_deref()),
        }
    }

    fn ticket(&mut self, id: String) -> DetailTicket {
        self.latest_seq = self.latest_seq.wrapping_add(1);
        DetailTicket {
            seq: self.latest_seq,
            id,
        }
    }
}
