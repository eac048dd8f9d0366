// src/noyau/eval.rs
//
// Évaluation postfixe + façade publique du pipeline:
//   normalise -> tokenize -> to_rpn -> eval_rpn

use super::canon::normalise;
use super::erreur::ErreurCalc;
use super::jetons::{format_jetons, format_rpn, tokenize, Jeton};
use super::rpn::to_rpn;

/// Trace du calcul, affichée dans le panneau "démarche" de l'interface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Demarche {
    /// Forme canonique de l'entrée (sortie du normaliseur).
    pub propre: String,
    /// Jetons infixes, rejoints en chaîne d'affichage.
    pub jetons: String,
    /// File postfixe, un jeton par mot.
    pub rpn: String,
}

/// Évalue une file postfixe. Pile de valeurs f64 :
/// un nombre se pousse, un opérateur ou une fonction dépile son arité,
/// applique, repousse. Tout résultat non fini (NaN, ±inf) est une erreur.
pub fn eval_rpn(rpn: &[Jeton]) -> Result<f64, ErreurCalc> {
    let mut pile: Vec<f64> = Vec::new();

    for jeton in rpn.iter().copied() {
        match jeton {
            Jeton::Nombre(x) => pile.push(x),

            Jeton::Op(op) => {
                let arite = op.arite();
                if pile.len() < arite {
                    return Err(ErreurCalc::AriteInvalide {
                        symbole: op.symbole(),
                        attendu: arite,
                        recu: pile.len(),
                    });
                }
                // dépile en ordre infixe : le dernier poussé est l'opérande droit
                let mut args = [0.0_f64; 2];
                for k in (0..arite).rev() {
                    args[k] = pile.pop().unwrap_or_default();
                }
                let v = op.applique(&args[..arite]);
                if !v.is_finite() {
                    return Err(ErreurCalc::ResultatInvalide(decrit_op(
                        op.symbole(),
                        &args[..arite],
                    )));
                }
                pile.push(v);
            }

            Jeton::Fonction(f) => {
                let Some(x) = pile.pop() else {
                    return Err(ErreurCalc::AriteInvalide {
                        symbole: f.nom(),
                        attendu: 1,
                        recu: 0,
                    });
                };
                let v = f.applique(x);
                if !v.is_finite() {
                    return Err(ErreurCalc::ResultatInvalide(format!(
                        "{}({x})",
                        f.nom()
                    )));
                }
                pile.push(v);
            }

            // une file postfixe bien formée n'en contient pas
            Jeton::LPar | Jeton::RPar => {
                return Err(ErreurCalc::ExpressionMalformee(
                    "parenthèse dans la file postfixe".into(),
                ));
            }
        }
    }

    if pile.len() != 1 {
        return Err(ErreurCalc::ExpressionMalformee(format!(
            "{} valeurs restantes après évaluation",
            pile.len()
        )));
    }
    Ok(pile[0])
}

fn decrit_op(symbole: &str, args: &[f64]) -> String {
    match args {
        [a, b] => format!("{a} {symbole} {b}"),
        [a] => format!("{symbole}{a}"),
        _ => symbole.to_string(),
    }
}

/* ------------------------ Façade publique ------------------------ */

/// Évalue une expression infixe brute et rend le résultat.
pub fn eval_expression(brut: &str) -> Result<f64, ErreurCalc> {
    let (resultat, _) = eval_detaille(brut)?;
    Ok(resultat)
}

/// Comme `eval_expression`, mais rend aussi la démarche (forme canonique,
/// jetons, RPN) pour affichage.
pub fn eval_detaille(brut: &str) -> Result<(f64, Demarche), ErreurCalc> {
    let propre = normalise(brut)?;
    let jetons = tokenize(&propre)?;
    let rpn = to_rpn(&jetons)?;
    let resultat = eval_rpn(&rpn)?;
    let demarche = Demarche {
        propre,
        jetons: format_jetons(&jetons),
        rpn: format_rpn(&rpn),
    };
    Ok((resultat, demarche))
}

/// Met une expression en forme canonique d'affichage, sans l'évaluer.
/// Idempotent : reformater la sortie rend la même chaîne.
pub fn format_expression(brut: &str) -> Result<String, ErreurCalc> {
    let propre = normalise(brut)?;
    let jetons = tokenize(&propre)?;
    Ok(format_jetons(&jetons))
}

/* ------------------------ Tests ------------------------ */
