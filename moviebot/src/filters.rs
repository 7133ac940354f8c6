//! The filters a user picks before asking for recommendations, and the two-step flow that
//! collects them: first a genre from a select menu, then the rest from a modal form.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

/// How long the genre menu stays usable after `/recommend`
pub const GENRE_MENU_TIMEOUT_SECS: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Romance,
    #[strum(serialize = "Sci-Fi")]
    SciFi,
    Thriller,
    Animation,
    Crime,
}

impl Genre {
    /// TMDB's category id for this genre
    pub fn tmdb_id(self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Comedy => 35,
            Genre::Drama => 18,
            Genre::Fantasy => 14,
            Genre::Horror => 27,
            Genre::Romance => 10749,
            Genre::SciFi => 878,
            Genre::Thriller => 53,
            Genre::Animation => 16,
            Genre::Crime => 80,
        }
    }

    /// Categories filtered out of the results for this genre (animation, family and fantasy for
    /// Horror)
    pub fn excluded_genres(self) -> &'static [u32] {
        match self {
            Genre::Horror => &[16, 10751, 14],
            _ => &[],
        }
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Japanese,
    French,
    Korean,
}

impl Language {
    /// ISO 639-1 code sent to TMDB
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Japanese => "ja",
            Language::French => "fr",
            Language::Korean => "ko",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Japanese => "Japanese",
            Language::French => "French",
            Language::Korean => "Korean",
        }
    }

    /// Look a language up by its English name. Anything we don't know falls back to English.
    pub fn lookup(input: &str) -> Self {
        let input = input.trim();
        Self::iter()
            .find(|language| language.name().eq_ignore_ascii_case(input))
            .unwrap_or_default()
    }
}

/// Everything needed to ask TMDB for recommendations
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub genre: Genre,
    pub year_from: i32,
    pub year_to: i32,
    pub min_rating: f64,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("year range {0:?} should look like 2010-2022")]
    MalformedRange(String),
    #[error("minimum rating {0:?} is not a number")]
    InvalidRating(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown genre {0:?}")]
pub struct UnknownGenre(pub String);

/// First step of the flow: the user has run `/recommend` and is looking at the genre menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenreSelection;

impl GenreSelection {
    /// The genres offered in the menu, in display order
    pub fn options() -> impl Iterator<Item = Genre> {
        Genre::iter()
    }

    /// Picking a genre moves the flow on to the detail form
    pub fn select(self, value: &str) -> Result<DetailForm, UnknownGenre> {
        value
            .parse::<Genre>()
            .map(DetailForm::new)
            .map_err(|_| UnknownGenre(value.to_owned()))
    }

    /// Whether a menu sent at `opened_at` has gone inert by `now` (both unix seconds)
    pub fn is_expired(opened_at: i64, now: i64) -> bool {
        now - opened_at > GENRE_MENU_TIMEOUT_SECS
    }
}

/// The raw text the user typed into the detail form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailInput {
    pub year_range: String,
    pub rating: String,
    pub language: String,
}

/// Second step of the flow: the genre is known and the detail form is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailForm {
    genre: Genre,
}

impl DetailForm {
    pub fn new(genre: Genre) -> Self {
        Self { genre }
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Submitting the form ends the flow, either with a complete set of filters or with the
    /// first thing that failed to parse.
    pub fn submit(self, input: &DetailInput) -> Result<Filters, FilterError> {
        let (year_from, year_to) = parse_year_range(&input.year_range)?;
        let min_rating = parse_rating(&input.rating)?;
        Ok(Filters {
            genre: self.genre,
            year_from,
            year_to,
            min_rating,
            language: Language::lookup(&input.language),
        })
    }
}

fn parse_year_range(input: &str) -> Result<(i32, i32), FilterError> {
    let malformed = || FilterError::MalformedRange(input.to_owned());
    let (from, to) = input.trim().split_once('-').ok_or_else(malformed)?;
    let from = from.trim().parse().map_err(|_| malformed())?;
    let to = to.trim().parse().map_err(|_| malformed())?;
    Ok((from, to))
}

fn parse_rating(input: &str) -> Result<f64, FilterError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
        .ok_or_else(|| FilterError::InvalidRating(input.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(year_range: &str, rating: &str, language: &str) -> DetailInput {
        DetailInput {
            year_range: year_range.to_owned(),
            rating: rating.to_owned(),
            language: language.to_owned(),
        }
    }

    #[test]
    fn only_horror_excludes_genres() {
        for genre in Genre::iter() {
            if genre == Genre::Horror {
                assert_eq!(genre.excluded_genres(), &[16, 10751, 14]);
            } else {
                assert!(genre.excluded_genres().is_empty(), "{} excludes", genre);
            }
        }
    }

    #[test]
    fn menu_offers_ten_genres_by_label() {
        let labels: Vec<&str> = GenreSelection::options().map(Genre::label).collect();
        assert_eq!(
            labels,
            [
                "Action",
                "Comedy",
                "Drama",
                "Fantasy",
                "Horror",
                "Romance",
                "Sci-Fi",
                "Thriller",
                "Animation",
                "Crime"
            ]
        );
    }

    #[test]
    fn selecting_a_genre_opens_the_detail_form() {
        let form = GenreSelection.select("Sci-Fi").unwrap();
        assert_eq!(form.genre(), Genre::SciFi);
        assert_eq!(form.genre().tmdb_id(), 878);
    }

    #[test]
    fn selecting_an_unknown_genre_fails() {
        assert_eq!(
            GenreSelection.select("Western"),
            Err(UnknownGenre("Western".to_owned()))
        );
    }

    #[test]
    fn submit_builds_filters() {
        let filters = DetailForm::new(Genre::Drama)
            .submit(&input("2010-2022", "7.0", "English"))
            .unwrap();
        assert_eq!(
            filters,
            Filters {
                genre: Genre::Drama,
                year_from: 2010,
                year_to: 2022,
                min_rating: 7.0,
                language: Language::English,
            }
        );
        assert_eq!(filters.language.code(), "en");
    }

    #[test]
    fn submit_trims_whitespace() {
        let filters = DetailForm::new(Genre::Crime)
            .submit(&input(" 1990 - 1999 ", " 6.5 ", " japanese "))
            .unwrap();
        assert_eq!((filters.year_from, filters.year_to), (1990, 1999));
        assert_eq!(filters.min_rating, 6.5);
        assert_eq!(filters.language, Language::Japanese);
    }

    #[test]
    fn range_without_separator_is_malformed() {
        assert_eq!(
            DetailForm::new(Genre::Action).submit(&input("2010", "7.0", "English")),
            Err(FilterError::MalformedRange("2010".to_owned()))
        );
    }

    #[test]
    fn range_with_non_numeric_half_is_malformed() {
        assert!(matches!(
            DetailForm::new(Genre::Action).submit(&input("2010-now", "7.0", "English")),
            Err(FilterError::MalformedRange(_))
        ));
    }

    #[test]
    fn non_numeric_rating_is_invalid() {
        assert_eq!(
            DetailForm::new(Genre::Action).submit(&input("2010-2022", "great", "English")),
            Err(FilterError::InvalidRating("great".to_owned()))
        );
        assert!(matches!(
            DetailForm::new(Genre::Action).submit(&input("2010-2022", "NaN", "English")),
            Err(FilterError::InvalidRating(_))
        ));
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        assert_eq!(Language::lookup("Klingon"), Language::English);
        assert_eq!(Language::lookup("Klingon").code(), "en");
        assert_eq!(Language::lookup("Korean").code(), "ko");
    }

    #[test]
    fn menu_expires_after_three_minutes() {
        assert!(!GenreSelection::is_expired(1_000, 1_000));
        assert!(!GenreSelection::is_expired(1_000, 1_180));
        assert!(GenreSelection::is_expired(1_000, 1_181));
    }
}
