//! Log-Pearson type III fitting, scoring and inversion.

mod fit;
mod method;
mod params;
pub(crate) mod pearson3;
mod usgs;

pub use fit::{GroupFits, MIN_FIT_SAMPLE, fit, fit_all_methods, fit_by_group};
pub use method::Lp3Method;
pub use params::{Lp3Params, to_rp, to_value};
pub use pearson3::PearsonIII;
