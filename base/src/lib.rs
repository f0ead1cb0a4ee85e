/*!
 * Base types shared by the plotive-carpet crates: colors and geometry.
 */

pub mod color;
pub mod geom;

pub use color::ColorU8;
