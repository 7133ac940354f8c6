use serenity::model::application::component::{ActionRow, ActionRowComponent};

use crate::ParseError;

/// Find the value the user typed into the modal text input with the given `custom_id`.
///
/// Modals lay their inputs out one per action row, but this searches every row so the layout
/// is free to change. A missing input is a [`ParseError::MissingOption`].
pub fn text_input(rows: &[ActionRow], custom_id: &str) -> Result<String, ParseError> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                Some(input.value.clone())
            }
            _ => None,
        })
        .ok_or(ParseError::MissingOption)
}

/// The single value picked from a select menu with `max_values(1)`
pub fn selected_value(values: &[String]) -> Result<&str, ParseError> {
    values
        .first()
        .map(String::as_str)
        .ok_or(ParseError::MissingOption)
}
