//! The catalogue of built-in rewrite recipes.
//!
//! Each recipe is a self-contained [`Recipe`] implementation; this crate
//! collects them behind a registry so callers can enumerate them or look
//! one up by its stable name.

use mend_rewrite::{Recipe, RewriteError};

mod char_to_int;

pub use char_to_int::ReplaceCharToIntWithCode;

/// Builds every registered recipe.
///
/// # Errors
///
/// Returns [`RewriteError`] if any recipe fails to construct, which
/// indicates a defect in the recipe's built-in configuration.
pub fn all() -> Result<Vec<Box<dyn Recipe>>, RewriteError> {
    Ok(vec![Box::new(ReplaceCharToIntWithCode::new()?)])
}

/// Looks up a recipe by its stable name.
///
/// # Errors
///
/// Propagates construction failures from [`all`].
pub fn find(name: &str) -> Result<Option<Box<dyn Recipe>>, RewriteError> {
    Ok(all()?.into_iter().find(|recipe| recipe.name() == name))
}
