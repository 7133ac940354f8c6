use serenity::{builder::CreateEmbed, utils::Colour};

use crate::{filters::Language, recommendations::Recommendation};

/// Overviews longer than this many characters are cut off
pub const OVERVIEW_LIMIT: usize = 300;
const TITLE_PREFIX: &str = "🎬 ";

pub const PICK_GENRE: &str = "🎬 Pick your preferred genre:";
pub const MENU_EXPIRED: &str = "⌛ This menu has expired, run /recommend again.";
pub const NO_RESULTS: &str = "😢 No movies found with your filters.";
pub const NO_SAVED_MOVIES: &str = "❌ You haven’t saved any movies yet.";
pub const SAVED_LIST_CLEARED: &str = "🧹 Your saved list has been cleared!";
pub const NOTHING_TO_CLEAR: &str = "📂 You don't have any saved movies yet.";
pub const SAVE_BUTTON_LABEL: &str = "💾 Save for Later";

pub fn truncate_overview(overview: &str) -> &str {
    match overview.char_indices().nth(OVERVIEW_LIMIT) {
        Some((end, _)) => &overview[..end],
        None => overview,
    }
}

pub fn recommendation_title(title: &str) -> String {
    format!("{}{}", TITLE_PREFIX, title)
}

/// Recover the movie title from an embed produced by [`format_recommendation_embed`]
pub fn title_from_embed(embed_title: &str) -> &str {
    embed_title
        .strip_prefix(TITLE_PREFIX)
        .unwrap_or(embed_title)
}

pub fn recommendation_description(recommendation: &Recommendation) -> String {
    format!(
        "⭐ {:.1}/10\n\n{}...",
        recommendation.movie.vote_average,
        truncate_overview(&recommendation.movie.overview)
    )
}

pub fn format_recommendation_embed<'a>(
    recommendation: &Recommendation,
    language: Language,
    poster_url: Option<String>,
    embed: &'a mut CreateEmbed,
) -> &'a mut CreateEmbed {
    embed.title(recommendation_title(&recommendation.movie.title));
    embed.description(recommendation_description(recommendation));
    embed.colour(Colour::PURPLE);
    embed.field("Platforms", recommendation.streaming.to_string(), true);
    embed.field("Language", language.name(), true);
    if let Some(url) = poster_url {
        embed.image(url);
    }
    embed
}

pub fn saved_confirmation(title: &str) -> String {
    format!("✅ Saved **{}** to your list!", title)
}

pub fn saved_list_message(titles: &[String]) -> String {
    if titles.is_empty() {
        return NO_SAVED_MOVIES.to_owned();
    }
    let saved_list = titles
        .iter()
        .map(|title| format!("• {}", title))
        .collect::<Vec<_>>()
        .join("\n");
    format!("📂 **Your Saved Movies:**\n\n{}", saved_list)
}

pub fn error_message(error: &dyn std::error::Error) -> String {
    format!("❌ Something went wrong: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        filters::FilterError,
        tmdb::{Movie, StreamingInfo},
    };

    fn recommendation(overview: &str) -> Recommendation {
        Recommendation {
            movie: Movie {
                id: 1,
                title: "Alien".to_owned(),
                vote_average: 8.4,
                overview: overview.to_owned(),
                poster_path: Some("/alien.jpg".to_owned()),
            },
            streaming: StreamingInfo::NotAvailable,
        }
    }

    #[test]
    fn short_overview_is_untouched() {
        assert_eq!(truncate_overview("In space"), "In space");
    }

    #[test]
    fn long_overview_is_cut_on_a_char_boundary() {
        let overview = "é".repeat(OVERVIEW_LIMIT + 20);
        let truncated = truncate_overview(&overview);
        assert_eq!(truncated.chars().count(), OVERVIEW_LIMIT);
    }

    #[test]
    fn description_shows_rating_and_overview() {
        assert_eq!(
            recommendation_description(&recommendation("A crew meets a creature.")),
            "⭐ 8.4/10\n\nA crew meets a creature...."
        );
    }

    #[test]
    fn title_round_trips_through_embed() {
        let embed_title = recommendation_title("Alien");
        assert_eq!(embed_title, "🎬 Alien");
        assert_eq!(title_from_embed(&embed_title), "Alien");
        assert_eq!(title_from_embed("Untitled"), "Untitled");
    }

    #[test]
    fn saved_list_is_bulleted_in_order() {
        let titles = vec!["A".to_owned(), "B".to_owned()];
        assert_eq!(
            saved_list_message(&titles),
            "📂 **Your Saved Movies:**\n\n• A\n• B"
        );
    }

    #[test]
    fn empty_saved_list_has_notice() {
        assert_eq!(saved_list_message(&[]), NO_SAVED_MOVIES);
    }

    #[test]
    fn errors_share_one_message_format() {
        let error = FilterError::MalformedRange("2010".to_owned());
        assert_eq!(
            error_message(&error),
            "❌ Something went wrong: year range \"2010\" should look like 2010-2022"
        );
    }
}
