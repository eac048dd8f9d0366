// src/noyau/erreur.rs
//
// Erreurs du noyau : une variante par famille, distinguable par code
// (l'interface n'affiche que l'indicateur, les tests filtrent par variante).

use std::error::Error;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum ErreurCalc {
    /// Structure irrécupérable : ')' avant '(', ou pile de valeurs
    /// incohérente après évaluation.
    ExpressionMalformee(String),
    /// Deux opérateurs binaires en succession directe.
    OperateurInvalide(String),
    /// Opérateur sans opérande droite (avant ')' ou en fin de saisie).
    OperandeManquante(String),
    /// Entrée vide ou symbole hors de la grammaire des jetons.
    ExpressionIllisible(String),
    /// Parenthèses non appariées découvertes pendant la conversion.
    ParenthesesDesequilibrees,
    /// Opérateur ou fonction appliqué à moins de valeurs que son arité.
    AriteInvalide {
        symbole: &'static str,
        attendu: usize,
        recu: usize,
    },
    /// Le calcul sort de R fini : division par zéro, hors domaine, dépassement.
    ResultatInvalide(String),
    /// Identifiant absent du registre de fonctions.
    FonctionInconnue(String),
}

impl fmt::Display for ErreurCalc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErreurCalc::ExpressionMalformee(detail) => {
                write!(f, "expression malformée : {detail}")
            }
            ErreurCalc::OperateurInvalide(detail) => {
                write!(f, "opérateur invalide : {detail}")
            }
            ErreurCalc::OperandeManquante(detail) => {
                write!(f, "opérande manquante : {detail}")
            }
            ErreurCalc::ExpressionIllisible(detail) => {
                write!(f, "expression illisible : {detail}")
            }
            ErreurCalc::ParenthesesDesequilibrees => {
                write!(f, "parenthèses déséquilibrées")
            }
            ErreurCalc::AriteInvalide {
                symbole,
                attendu,
                recu,
            } => {
                write!(f, "'{symbole}' attend {attendu} valeur(s), {recu} disponible(s)")
            }
            ErreurCalc::ResultatInvalide(detail) => {
                write!(f, "résultat non défini : {detail}")
            }
            ErreurCalc::FonctionInconnue(nom) => {
                write!(f, "fonction inconnue : {nom}")
            }
        }
    }
}

impl Error for ErreurCalc {}

/* ------------------------ Tests ------------------------ */
