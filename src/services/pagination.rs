use crate::errors::{AppError, AppResult};

/// Returns the `page`-th (1-based) slice of `items`, `page_size` items wide.
///
/// Page numbers below 1 are treated as page 1. A page past the end yields an
/// empty slice rather than an error.
pub fn paginate<T>(items: &[T], page: i64, page_size: i64) -> AppResult<&[T]> {
    if page_size <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "page size must be positive, got {}",
            page_size
        )));
    }

    let page = page.max(1);
    let start = match (page - 1).checked_mul(page_size) {
        Some(start) => usize::try_from(start).unwrap_or(usize::MAX),
        None => return Ok(&[]),
    };

    if start >= items.len() {
        return Ok(&[]);
    }

    let end = start
        .saturating_add(page_size as usize)
        .min(items.len());

    Ok(&items[start..end])
}
