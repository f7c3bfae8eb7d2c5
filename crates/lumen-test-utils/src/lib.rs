//! Test utilities for Lumen.
//!
//! This crate provides test doubles for the collaborators widgets consume:
//!
//! - [`MockDom`] - in-memory element tree implementing [`Dom`](lumen_core::Dom)
//! - [`MockAnimator`] - an [`Animator`](lumen_core::Animator) whose
//!   completions are run explicitly by the test
//!
//! Both record their calls so tests can assert on what a widget did, not
//! only on the resulting state.
//!
//! # Interior Mutability
//!
//! The collaborator traits take `&self`, so the mocks keep their state
//! behind `parking_lot::Mutex`. Locks are never held while a completion
//! callback runs, so callbacks may call back into the mocks.

pub mod mock_animator;
pub mod mock_dom;

pub use mock_animator::{AnimateCall, MockAnimator};
pub use mock_dom::{DomCall, MockDom};
