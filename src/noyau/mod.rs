// src/noyau/mod.rs
//
// Noyau de calcul : bibliothèque pure, aucune dépendance d'interface.
// Pipeline : normalise -> tokenize -> to_rpn -> eval_rpn.

pub mod canon;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_fuzz_safe;
#[cfg(test)]
mod tests_scientifiques;

pub use erreur::ErreurCalc;
pub use eval::{eval_detaille, eval_expression, format_expression, Demarche};
pub use fonctions::{est_operateur, noms_fonctions, Fonction, Operateur};
pub use jetons::Jeton;
