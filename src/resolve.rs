use crate::error::AppError;
use crate::models::selector::Selector;

/// Resolve a raw selector expression.
///
/// Accepted forms: `all`, `group:<name>`, `label:<name>`, `location:<name>`,
/// `id:<serial>`. Prefixes are case-sensitive, surrounding whitespace is
/// rejected and the value after the colon must not be empty. Nothing is
/// looked up remotely.
pub fn resolve(raw: &str) -> Result<Selector, AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::validation("Selector must not be empty"));
    }

    if raw.trim() != raw {
        return Err(unrecognized(raw));
    }

    if raw == "all" {
        return Ok(Selector::All);
    }

    let Some((prefix, value)) = raw.split_once(':') else {
        return Err(unrecognized(raw));
    };

    let build: fn(String) -> Selector = match prefix {
        "group" => Selector::Group,
        "label" => Selector::Label,
        "location" => Selector::Location,
        "id" => Selector::Id,
        "all" => {
            return Err(AppError::validation(
                "Selector 'all' does not take a value",
            ))
        }
        _ => return Err(unrecognized(raw)),
    };

    if value.trim().is_empty() {
        return Err(AppError::validation(format!(
            "Selector '{}:' is missing a value after the colon",
            prefix
        )));
    }

    Ok(build(value.to_string()))
}

/// Resolve an optional selector argument, defaulting to `all`.
pub fn resolve_or_all(raw: Option<&str>) -> Result<Selector, AppError> {
    match raw {
        Some(raw) => resolve(raw),
        None => Ok(Selector::All),
    }
}

fn unrecognized(raw: &str) -> AppError {
    AppError::validation(format!(
        "Unrecognized selector '{}'. Expected one of: all, group:<name>, label:<name>, location:<name>, id:<serial>",
        raw
    ))
}
