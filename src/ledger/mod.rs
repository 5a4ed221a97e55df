//! Psi energy economy.
//!
//! - `PsiUnit`: one unit's pool, resistance, immunities and school
//! - `PsiSchool`: specialization with a regeneration bonus
//! - `PsiLedger`: owns every pool; spending and regeneration

mod pool;
mod unit;

pub use pool::PsiLedger;
pub use unit::{PsiSchool, PsiUnit, MAX_RESISTANCE};
