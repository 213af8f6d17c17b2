//! Policy agent for bot seats.
//!
//! Bots never play anything the rules do not admit: the model scores every
//! category, illegal ones are penalized out of contention, and the argmax is
//! re-checked before it is returned.
//!
//! ## Usage
//!
//! ```rust
//! use big2_table::codec::{ActionMask, CategoryId};
//! use big2_table::nn::{Tensor, UniformLogits};
//! use big2_table::policy::select_action;
//!
//! let mask = ActionMask::only(8, &[CategoryId(3), CategoryId(5)]);
//! let model = UniformLogits::new(8);
//! let chosen = select_action(&model, &Tensor::zeros(vec![1, 4]), &mask, 1e9).unwrap();
//! assert_eq!(chosen, CategoryId(3));
//! ```

pub mod agent;
pub mod select;

pub use agent::{PolicyAgent, PolicyDecision};
pub use select::select_action;
