//! SMP Rigid Body Export Core
//!
//! This crate contains the core pipeline for turning a rigid-body scene
//! snapshot into a bullet SMP physics .xml document:
//! - SceneNode/SceneObject: the scene snapshot data model
//! - Classifier: naming-convention classification into physics entities
//! - Entities: static bones, kinematic bones, collision shapes, constraints
//! - Document: fixed-order XML assembly
//! - Project: serializable snapshot file

pub mod classify;
pub mod constants;
pub mod document;
pub mod entity;
pub mod export;
pub mod project;
pub mod scene;
pub mod transform;

pub use classify::*;
pub use constants::*;
pub use document::*;
pub use entity::*;
pub use export::*;
pub use project::*;
pub use scene::*;
pub use transform::*;
