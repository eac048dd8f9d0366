// src/noyau/canon.rs
//
// Normalisation : chaîne brute -> chaîne canonique prête à jetonner.
// Suite ORDONNÉE de passes nommées, chacune une réécriture pure
// testable isolément :
// - nettoyage (blancs, ×, majuscules) + double moins
// - validations (ordre parenthèses, opérateurs doubles, opérande droite)
// - marquage " - " de la soustraction binaire (affichage)
// - complétion décimale (.5 -> 0.5, 3. -> 3.0)
// - multiplication implicite (2(3+4), 2 3, )(, 2SQRT(…)
// - espaces (padding interne des parenthèses, espaces répétés)

use super::erreur::ErreurCalc;

/// Pipeline complet de normalisation, dans l'ordre du contrat.
/// Les validations passent AVANT les réécritures : on refuse tôt,
/// sur la forme la plus proche de la saisie.
pub fn normalise(brut: &str) -> Result<String, ErreurCalc> {
    let s = passe_nettoyage(brut);
    let s = passe_double_moins(&s);

    verifie_ordre_parentheses(&s)?;
    verifie_operateurs_doubles(&s)?;
    verifie_double_soustraction(&s)?;
    verifie_operande_droite(&s)?;

    let s = passe_marque_soustraction(&s);
    let s = passe_colle_binaires(&s);
    let s = passe_complete_decimales(&s);
    let s = passe_mult_implicite(&s);
    let s = passe_padding_parentheses(&s);
    Ok(passe_espaces(&s))
}

fn suivant_non_espace(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i] == ' ' {
        i += 1;
    }
    i
}

fn est_op_sans_moins(c: char) -> bool {
    matches!(c, '+' | '*' | '/' | '^')
}

/// Vrai si le caractère en position `i` appartient à un identifiant :
/// une lettre, ou un chiffre rattaché à un nom comme LOG10 ou EXPM1.
/// Ces chiffres ne bornent jamais un nombre.
fn dans_identifiant(chars: &[char], i: usize) -> bool {
    if chars[i].is_ascii_alphabetic() {
        return true;
    }
    if !chars[i].is_ascii_digit() {
        return false;
    }
    let mut k = i;
    while k > 0 && chars[k - 1].is_ascii_digit() {
        k -= 1;
    }
    k > 0 && chars[k - 1].is_ascii_alphabetic()
}

/* ------------------------ Nettoyage ------------------------ */

/// Retire \n \t \r, remplace × par *, met les identifiants en majuscules.
fn passe_nettoyage(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' | '\t' | '\r' => {}
            '×' => out.push('*'),
            _ => out.push(c.to_ascii_uppercase()),
        }
    }
    out
}

/// Double moins : "--" après une valeur devient "+" (double négation,
/// 3--2 = 5), ailleurs il disparaît (--2 = 2).
fn passe_double_moins(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '-' && i + 1 < chars.len() && chars[i + 1] == '-' {
            let apres_valeur = out
                .iter()
                .rev()
                .find(|c| !c.is_whitespace())
                .is_some_and(|c| c.is_ascii_digit() || *c == ')');
            if apres_valeur {
                out.push('+');
            }
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out.into_iter().collect()
}

/* ------------------------ Validations ------------------------ */

/// ')' rencontrée avant toute '(' : parenthèses dans le mauvais ordre.
fn verifie_ordre_parentheses(s: &str) -> Result<(), ErreurCalc> {
    if let (Some(ouvre), Some(ferme)) = (s.find('('), s.find(')')) {
        if ferme < ouvre {
            return Err(ErreurCalc::ExpressionMalformee(
                "')' rencontrée avant '('".into(),
            ));
        }
    }
    Ok(())
}

/// Deux opérateurs (hors moins) en succession directe, espaces admis.
fn verifie_operateurs_doubles(s: &str) -> Result<(), ErreurCalc> {
    let chars: Vec<char> = s.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !est_op_sans_moins(c) {
            continue;
        }
        let j = suivant_non_espace(&chars, i + 1);
        if j < chars.len() && est_op_sans_moins(chars[j]) {
            return Err(ErreurCalc::OperateurInvalide(format!(
                "'{c}' suivi de '{}'",
                chars[j]
            )));
        }
    }
    Ok(())
}

/// Deux soustractions séparées seulement par des espaces ("5 - - 2").
/// Le second moins doit être suivi d'un espace, sinon c'est une négation
/// ("5 - -2" reste valide).
fn verifie_double_soustraction(s: &str) -> Result<(), ErreurCalc> {
    let chars: Vec<char> = s.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c != '-' {
            continue;
        }
        let j = suivant_non_espace(&chars, i + 1);
        if j > i + 1 && j < chars.len() && chars[j] == '-' {
            let k = j + 1;
            if k < chars.len() && chars[k] == ' ' {
                return Err(ErreurCalc::OperateurInvalide(
                    "deux soustractions de suite".into(),
                ));
            }
        }
    }
    Ok(())
}

/// Opérateur suivi de ')' ou de la fin de chaîne : opérande droite absente.
fn verifie_operande_droite(s: &str) -> Result<(), ErreurCalc> {
    let chars: Vec<char> = s.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !est_op_sans_moins(c) && c != '-' {
            continue;
        }
        let j = suivant_non_espace(&chars, i + 1);
        if j >= chars.len() || chars[j] == ')' {
            return Err(ErreurCalc::OperandeManquante(format!(
                "'{c}' sans opérande droite"
            )));
        }
    }
    Ok(())
}

/* ------------------------ Réécritures ------------------------ */

/// Chiffre-moins-chiffre -> "chiffre - chiffre" : marque d'affichage de la
/// soustraction binaire (la négation reste collée à son opérande).
fn passe_marque_soustraction(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        let entre_chiffres = c == '-'
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && !dans_identifiant(&chars, i - 1)
            && i + 1 < chars.len()
            && chars[i + 1].is_ascii_digit();
        if entre_chiffres {
            out.push_str(" - ");
        } else {
            out.push(c);
        }
    }

    out
}

/// Retire les espaces autour des opérateurs binaires autres que le moins :
/// "2 + 3" -> "2+3".
fn passe_colle_binaires(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        out.push(chars[i]);
        if chars[i].is_ascii_digit() && !dans_identifiant(&chars, i) {
            let j = suivant_non_espace(&chars, i + 1);
            if j < chars.len() && est_op_sans_moins(chars[j]) {
                let k = suivant_non_espace(&chars, j + 1);
                if k < chars.len() && chars[k].is_ascii_digit() {
                    out.push(chars[j]);
                    i = k;
                    continue;
                }
            }
        }
        i += 1;
    }

    out
}

/// Complète les nombres décimaux : ".5" -> "0.5", "3." -> "3.0",
/// y compris en début/fin de chaîne.
fn passe_complete_decimales(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c != '.' {
            out.push(c);
            continue;
        }
        if i == 0 || !chars[i - 1].is_ascii_digit() {
            out.push('0');
        }
        out.push('.');
        if i + 1 >= chars.len() || !chars[i + 1].is_ascii_digit() {
            out.push('0');
        }
    }

    out
}

/// Multiplication implicite : insère '*' entre
/// - deux nombres séparés par des espaces      "2 3"      -> "2*3"
/// - un nombre et un nom de fonction           "2SQRT("   -> "2*SQRT("
/// - ')' et un nombre / une lettre / '('       ")2", ")(",
/// - un nombre et '('                          "2("       -> "2*("
fn passe_mult_implicite(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(chars.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        out.push(c);

        // le chiffre final d'un nom (LOG10, LOG2, …) n'est pas un nombre
        if (c.is_ascii_digit() && !dans_identifiant(&chars, i)) || c == ')' {
            let j = suivant_non_espace(&chars, i + 1);
            if j < chars.len() {
                let suivant = chars[j];
                let espace = j > i + 1;
                let besoin = match suivant {
                    // deux nombres ne fusionnent que s'ils étaient séparés
                    '0'..='9' => c == ')' || espace,
                    '(' => true,
                    _ => suivant.is_ascii_alphabetic(),
                };
                if besoin {
                    out.push('*');
                    i = j;
                    continue;
                }
            }
        }

        i += 1;
    }

    out
}

/// Retire le padding interne des parenthèses : "( 2" -> "(2", "3 )" -> "3)".
fn passe_padding_parentheses(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '(' {
            out.push(c);
            let j = suivant_non_espace(&chars, i + 1);
            if j < chars.len() && (chars[j].is_ascii_digit() || chars[j] == '(') {
                i = j;
                continue;
            }
            i += 1;
            continue;
        }

        if c == ' ' {
            let j = suivant_non_espace(&chars, i);
            let prec_valeur = out.last().is_some_and(|p| p.is_ascii_digit() || *p == ')');
            if j < chars.len() && chars[j] == ')' && prec_valeur {
                i = j;
                continue;
            }
        }

        out.push(c);
        i += 1;
    }

    out.into_iter().collect()
}

/// Réduit les suites d'espaces à un seul, et retire ceux des extrémités.
fn passe_espaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut en_attente = false;

    for c in s.trim().chars() {
        if c == ' ' {
            en_attente = true;
        } else {
            if en_attente && !out.is_empty() {
                out.push(' ');
            }
            en_attente = false;
            out.push(c);
        }
    }

    out
}

/* ------------------------ Tests ------------------------ */
