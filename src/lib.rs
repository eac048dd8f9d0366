//! Calculatrice infixe : un noyau d'évaluation d'expressions
//! arithmétiques (normalisation, jetons, shunting-yard, RPN) et une
//! interface egui qui l'appelle.
//!
//! Le noyau vit dans [`noyau`] et s'utilise seul :
//!
//! ```
//! use calculatrice_infixe::noyau::eval_expression;
//!
//! assert_eq!(eval_expression("2+3*4"), Ok(14.0));
//! assert_eq!(eval_expression("SQRT(16)"), Ok(4.0));
//! ```

pub mod app;
pub mod noyau;

pub use app::Application;
