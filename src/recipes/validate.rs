use super::dto::CreateRecipeRequest;

pub const MIN_INSTRUCTIONS_CHARS: usize = 50;

pub const TITLE_REQUIRED: &str = "Title is required.";
pub const INSTRUCTIONS_TOO_SHORT: &str = "Instructions must be at least 50 characters long.";
pub const MINUTES_NOT_POSITIVE: &str = "Minutes to complete must be a positive number.";

#[derive(Debug)]
pub struct ValidRecipe {
    pub title: String,
    pub instructions: String,
    pub minutes_to_complete: Option<i32>,
}

/// Collects every violation in field order. Length is counted in characters,
/// not bytes.
pub fn validate_recipe(req: CreateRecipeRequest) -> Result<ValidRecipe, Vec<String>> {
    let mut errors = Vec::new();

    let title = req.title.filter(|t| !t.is_empty());
    if title.is_none() {
        errors.push(TITLE_REQUIRED.to_string());
    }
    let instructions = req
        .instructions
        .filter(|i| i.chars().count() >= MIN_INSTRUCTIONS_CHARS);
    if instructions.is_none() {
        errors.push(INSTRUCTIONS_TOO_SHORT.to_string());
    }
    if matches!(req.minutes_to_complete, Some(m) if m <= 0) {
        errors.push(MINUTES_NOT_POSITIVE.to_string());
    }

    match (title, instructions) {
        (Some(title), Some(instructions)) if errors.is_empty() => Ok(ValidRecipe {
            title,
            instructions,
            minutes_to_complete: req.minutes_to_complete,
        }),
        _ => Err(errors),
    }
}
