//! Card and row presentation of result items.
//!
//! Pure functions of a single item; the UI lays the output out as a grid
//! of cards or a compact table.

use cinephilix_api::catalog::{Person, Title};

use crate::format;

/// Principals shown on a title card.
const CARD_PRINCIPALS: usize = 3;

/// Known-for titles shown on a person card.
const CARD_KNOWN_FOR: usize = 3;

/// Genre tags shown on a title card.
const CARD_GENRES: usize = 3;

/// Something the browser can show as a card or a table row.
pub trait Presentable {
    /// Column headers for the compact list view.
    const HEADER: &'static [&'static str];

    /// Heading line of the card.
    fn heading(&self) -> String;

    /// Card body lines below the heading.
    fn card_lines(&self) -> Vec<String>;

    /// Cells for the compact list view, one per `HEADER` column.
    fn row_cells(&self) -> Vec<String>;

    /// External link (poster or profile image).
    fn link(&self) -> Option<&str>;
}

impl Presentable for Title {
    const HEADER: &'static [&'static str] = &["Title", "Year", "Type", "Rating", "Genres"];

    fn heading(&self) -> String {
        self.primary_title.clone()
    }

    fn card_lines(&self) -> Vec<String> {
        let poster = if self.poster_url.is_some() {
            "[poster]"
        } else {
            "[no poster]"
        };
        let mut meta = vec![String::from(poster)];
        let years = format::year_span(self.start_year, self.end_year);
        if !years.is_empty() {
            meta.push(years);
        }
        if let Some(minutes) = self.runtime_minutes {
            meta.push(format::runtime(minutes));
        }

        let mut lines = vec![meta.join("  ")];
        lines.push(self.rating.map_or_else(
            || String::from("No rating"),
            |r| {
                format!(
                    "{} {} ({})",
                    format::stars(r.average_rating),
                    format::rating(r.average_rating),
                    format::thousands(r.num_votes)
                )
            },
        ));
        if !self.genres.is_empty() {
            let tags: Vec<String> = self
                .genres
                .iter()
                .take(CARD_GENRES)
                .map(|g| format!("[{g}]"))
                .collect();
            lines.push(tags.join(" "));
        }
        let principals: Vec<&str> = self
            .principals
            .iter()
            .take(CARD_PRINCIPALS)
            .map(|p| p.name.as_str())
            .collect();
        if !principals.is_empty() {
            lines.push(principals.join(", "));
        }
        lines
    }

    fn row_cells(&self) -> Vec<String> {
        vec![
            self.primary_title.clone(),
            self.start_year.map_or_else(String::new, |y| y.to_string()),
            String::from(self.title_type.label()),
            self.rating
                .map_or_else(|| String::from("-"), |r| format::rating(r.average_rating)),
            self.genres.join(", "),
        ]
    }

    fn link(&self) -> Option<&str> {
        self.poster_url.as_deref()
    }
}

impl Presentable for Person {
    const HEADER: &'static [&'static str] = &["Name", "Profession", "Years", "Known for"];

    fn heading(&self) -> String {
        self.primary_name.clone()
    }

    fn card_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.primary_profession.join(", "),
            format::life_span(self.birth_year, self.death_year),
        ];
        let known: Vec<&str> = self
            .known_for_titles
            .iter()
            .take(CARD_KNOWN_FOR)
            .map(|t| t.primary_title.as_str())
            .collect();
        if !known.is_empty() {
            lines.push(format!("Known for: {}", known.join(", ")));
        }
        lines
    }

    fn row_cells(&self) -> Vec<String> {
        let known: Vec<&str> = self
            .known_for_titles
            .iter()
            .take(CARD_KNOWN_FOR)
            .map(|t| t.primary_title.as_str())
            .collect();
        vec![
            self.primary_name.clone(),
            self.primary_profession.join(", "),
            format::life_span(self.birth_year, self.death_year),
            known.join(", "),
        ]
    }

    fn link(&self) -> Option<&str> {
        self.profile_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use cinephilix_api::catalog::{KnownForTitle, Principal, Rating, TitleType};

    use super::*;

    fn title() -> Title {
        Title {
            id: String::from("t1"),
            tconst: Some(String::from("tt1375666")),
            title_type: TitleType::Movie,
            primary_title: String::from("Inception"),
            original_title: None,
            is_adult: false,
            start_year: Some(2010),
            end_year: None,
            runtime_minutes: Some(148),
            genres: vec![
                String::from("Action"),
                String::from("Adventure"),
                String::from("Sci-Fi"),
                String::from("Thriller"),
            ],
            rating: Some(Rating {
                average_rating: 8.8,
                num_votes: 2_600_000,
            }),
            principals: ["Leonardo DiCaprio", "Joseph Gordon-Levitt", "Elliot Page", "Tom Hardy"]
                .iter()
                .map(|n| Principal {
                    name: String::from(*n),
                    category: String::from("actor"),
                })
                .collect(),
            poster_url: None,
            plot: None,
            cast: None,
            crew: None,
            reviews: None,
        }
    }

    #[test]
    fn test_title_card_lines() {
        // Arrange
        let t = title();

        // Act
        let lines = t.card_lines();

        // Assert
        assert_eq!(
            lines,
            vec![
                String::from("[no poster]  2010  2h 28m"),
                String::from(
                    "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606} 8.8/10 (2,600,000)"
                ),
                String::from("[Action] [Adventure] [Sci-Fi]"),
                String::from("Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page"),
            ]
        );
    }

    #[test]
    fn test_title_row_cells_match_header() {
        // Arrange
        let mut t = title();
        t.rating = None;

        // Act
        let cells = t.row_cells();

        // Assert
        assert_eq!(cells.len(), Title::HEADER.len());
        assert_eq!(cells.get(3).unwrap(), "-");
        assert_eq!(cells.get(2).unwrap(), "Movie");
    }

    #[test]
    fn test_person_card_lines() {
        // Arrange
        let person = Person {
            id: String::from("p1"),
            primary_name: String::from("Christopher Nolan"),
            birth_year: Some(1970),
            death_year: None,
            primary_profession: vec![String::from("director"), String::from("writer")],
            known_for_titles: ["Inception", "Memento", "Interstellar", "Tenet"]
                .iter()
                .map(|t| KnownForTitle {
                    id: t.to_lowercase(),
                    primary_title: String::from(*t),
                    start_year: None,
                    poster_url: None,
                })
                .collect(),
            profile_url: Some(String::from("https://img.example/nolan.jpg")),
        };

        // Act
        let lines = person.card_lines();

        // Assert
        assert_eq!(
            lines,
            vec![
                String::from("director, writer"),
                String::from("1970 - Present"),
                String::from("Known for: Inception, Memento, Interstellar"),
            ]
        );
        assert_eq!(person.row_cells().len(), Person::HEADER.len());
        assert_eq!(person.link(), Some("https://img.example/nolan.jpg"));
    }
}
