// src/noyau/jetons.rs

use super::erreur::ErreurCalc;
use super::fonctions::{Fonction, Operateur};

/// Jeton typé produit par `tokenize`. Immuable, l'ordre de la séquence
/// est significatif.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),
    Op(Operateur),
    Fonction(Fonction),
    LPar,
    RPar,
}

/// Jetonne une chaîne NORMALISÉE (sortie de canon::normalise).
/// Supporte:
/// - nombres décimaux non signés (12, 0.5, 3.0)
/// - opérateurs + - * / ^ et parenthèses ( )
/// - identifiants [A-Z][A-Z0-9]* résolus contre le registre de fonctions
///
/// Le moins est étiqueté au contexte : soustraction binaire si une valeur
/// le précède (nombre ou ')'), négation unaire sinon. Le marqueur " - "
/// issu de la normalisation n'est qu'une convention d'affichage.
///
/// Aucune autre validation sémantique ici; un identifiant inconnu échoue
/// tout de suite (FonctionInconnue) plutôt que d'être mal jetonné.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurCalc> {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<Jeton> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == ' ' {
            i += 1;
            continue;
        }

        if c == '(' {
            out.push(Jeton::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::RPar);
            i += 1;
            continue;
        }

        match c {
            '+' => {
                out.push(Jeton::Op(Operateur::Addition));
                i += 1;
                continue;
            }
            '*' => {
                out.push(Jeton::Op(Operateur::Multiplication));
                i += 1;
                continue;
            }
            '/' => {
                out.push(Jeton::Op(Operateur::Division));
                i += 1;
                continue;
            }
            '^' => {
                out.push(Jeton::Op(Operateur::Puissance));
                i += 1;
                continue;
            }
            '-' => {
                // soustraction si une valeur précède, négation sinon
                let op = match out.last() {
                    Some(Jeton::Nombre(_)) | Some(Jeton::RPar) => Operateur::Soustraction,
                    _ => Operateur::Negation,
                };
                out.push(Jeton::Op(op));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Nombre décimal non signé (le signe est un opérateur)
        if c.is_ascii_digit() {
            let debut = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let texte: String = chars[debut..i].iter().collect();
            let v: f64 = texte.parse().map_err(|_| {
                ErreurCalc::ExpressionIllisible(format!("nombre invalide: {texte}"))
            })?;
            out.push(Jeton::Nombre(v));
            continue;
        }

        // Identifiant : commence par une lettre, peut contenir des
        // chiffres (LOG10, EXPM1); résolu tout de suite contre le registre
        if c.is_ascii_alphabetic() {
            let debut = i;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let nom: String = chars[debut..i].iter().collect::<String>().to_ascii_uppercase();
            match Fonction::depuis_nom(&nom) {
                Some(f) => out.push(Jeton::Fonction(f)),
                None => return Err(ErreurCalc::FonctionInconnue(nom)),
            }
            continue;
        }

        return Err(ErreurCalc::ExpressionIllisible(format!(
            "symbole inattendu: '{c}'"
        )));
    }

    if out.is_empty() {
        return Err(ErreurCalc::ExpressionIllisible("expression vide".into()));
    }

    Ok(out)
}

/* ------------------------ Affichage ------------------------ */

fn format_nombre(x: f64) -> String {
    format!("{x}")
}

/// Rejoint les jetons en chaîne canonique d'affichage.
/// Seule la soustraction binaire garde ses espaces.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = String::new();
    for j in jetons {
        match j {
            Jeton::Nombre(x) => out.push_str(&format_nombre(*x)),
            Jeton::Op(op) => out.push_str(op.affichage()),
            Jeton::Fonction(f) => out.push_str(f.nom()),
            Jeton::LPar => out.push('('),
            Jeton::RPar => out.push(')'),
        }
    }
    out
}

/// Format utilitaire (démarche) : file postfixe en texte, un jeton par mot.
/// La négation unaire s'affiche "neg" pour rester distincte du moins binaire.
pub fn format_rpn(jetons: &[Jeton]) -> String {
    let mut mots: Vec<String> = Vec::with_capacity(jetons.len());
    for j in jetons {
        let mot = match j {
            Jeton::Nombre(x) => format_nombre(*x),
            Jeton::Op(Operateur::Negation) => "neg".to_string(),
            Jeton::Op(op) => op.symbole().to_string(),
            Jeton::Fonction(f) => f.nom().to_string(),
            Jeton::LPar => "(".to_string(),
            Jeton::RPar => ")".to_string(),
        };
        mots.push(mot);
    }
    mots.join(" ")
}

/* ------------------------ Tests ------------------------ */
