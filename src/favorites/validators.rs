use super::models::AddFavoriteRequest;
use crate::common::{ValidationResult, Validator};

pub const MAX_VOTE_AVERAGE: f64 = 10.0;

pub struct AddFavoriteValidator;

impl Validator<AddFavoriteRequest> for AddFavoriteValidator {
    fn validate(&self, data: &AddFavoriteRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        match data.movie_id {
            None => result.add_error("movieId", "movieId is required"),
            Some(id) if id <= 0 => result.add_error("movieId", "movieId must be a positive integer"),
            Some(_) => {}
        }

        if data.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            result.add_error("title", "Title is required");
        }

        if let Some(vote) = data.vote_average {
            if !vote.is_finite() || !(0.0..=MAX_VOTE_AVERAGE).contains(&vote) {
                result.add_error("voteAverage", "voteAverage must be between 0 and 10");
            }
        }

        result
    }
}

/// Integer coercion for the `:movieId` path segment.
///
/// Reads an optional sign followed by the leading run of digits and ignores
/// anything after it, so `"12abc"` is 12. Returns `None` when there are no
/// leading digits.
pub fn coerce_movie_id(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
