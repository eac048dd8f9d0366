// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> file postfixe (RPN).
// Règles:
// - un nombre sort directement
// - un opérateur dépile d'abord tout sommet de précédence strictement
//   supérieure, ou égale s'il est associatif à gauche
// - une fonction reste sur la pile, collée à son groupe parenthésé;
//   elle sort juste après la parenthèse fermante correspondante
// - la négation est préfixe : rien à sa gauche ne lui appartient,
//   elle se pousse sans dépiler (2^-3 = 2^(-3))

use super::erreur::ErreurCalc;
use super::fonctions::{Fonction, Operateur};
use super::jetons::Jeton;

/// Entrée de la pile d'opérateurs en attente.
enum Sommet {
    Op(Operateur),
    Fonction(Fonction),
    LPar,
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [SQRT, (, 16, )]      ->  rpn: [16, SQRT]
///   jetons: [2, +, 3, *, 4]       ->  rpn: [2, 3, 4, *, +]
pub fn to_rpn(jetons: &[Jeton]) -> Result<Vec<Jeton>, ErreurCalc> {
    let mut sortie: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut pile: Vec<Sommet> = Vec::new();

    for jeton in jetons.iter().copied() {
        match jeton {
            Jeton::Nombre(_) => sortie.push(jeton),

            // fonction : gardée sur la pile, elle sortira après son argument
            Jeton::Fonction(f) => pile.push(Sommet::Fonction(f)),

            Jeton::LPar => pile.push(Sommet::LPar),

            Jeton::RPar => {
                // dépile jusqu'à '('
                loop {
                    match pile.pop() {
                        Some(Sommet::LPar) => break,
                        Some(Sommet::Op(op)) => sortie.push(Jeton::Op(op)),
                        Some(Sommet::Fonction(f)) => sortie.push(Jeton::Fonction(f)),
                        None => return Err(ErreurCalc::ParenthesesDesequilibrees),
                    }
                }
                // si une fonction est au sommet, elle s'attache au groupe
                if matches!(pile.last(), Some(Sommet::Fonction(_))) {
                    if let Some(Sommet::Fonction(f)) = pile.pop() {
                        sortie.push(Jeton::Fonction(f));
                    }
                }
            }

            Jeton::Op(op) => {
                if op != Operateur::Negation {
                    // une fonction ou '(' au sommet bloque le dépilage
                    while let Some(Sommet::Op(haut)) = pile.last() {
                        let haut = *haut;
                        let depile = haut.precedence() > op.precedence()
                            || (haut.precedence() == op.precedence()
                                && op.associatif_gauche());
                        if !depile {
                            break;
                        }
                        pile.pop();
                        sortie.push(Jeton::Op(haut));
                    }
                }
                pile.push(Sommet::Op(op));
            }
        }
    }

    // vide la pile; une '(' restante signale un groupe jamais fermé
    while let Some(sommet) = pile.pop() {
        match sommet {
            Sommet::LPar => return Err(ErreurCalc::ParenthesesDesequilibrees),
            Sommet::Op(op) => sortie.push(Jeton::Op(op)),
            Sommet::Fonction(f) => sortie.push(Jeton::Fonction(f)),
        }
    }

    Ok(sortie)
}

/* ------------------------ Tests ------------------------ */
