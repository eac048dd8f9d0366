//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier le contrat du pipeline sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (longueur, imbrication)
//! - chaque famille d'erreur exercée avec sa variante attendue
//!
//! Notes (aligné avec l'état actuel du noyau) :
//! - Le moins est étiqueté au contexte : "(2+3)-5" soustrait, "2*-3" nie.
//! - La négation est préfixe de précédence 2 : -2^2 = -(2^2), 2^-3 = 2^(-3).
//! - Tout résultat non fini (NaN, ±inf) est une erreur, jamais une valeur.

use std::time::{Duration, Instant};

use super::{eval_expression, format_expression, ErreurCalc, Fonction};

fn eval_ok(expr: &str) -> f64 {
    eval_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    let tol = 1e-9 * attendu.abs().max(1.0);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} : {v} ≠ {attendu}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Table d'acceptation ------------------------ */

#[test]
fn sci_acceptation_exacte() {
    assert_proche("2+3*4", 14.0);
    assert_proche("(2+3)*4", 20.0);
    assert_proche("2^3^2", 512.0);
    assert_proche("SQRT(16)", 4.0);
    assert_proche("3--2", 5.0);
    assert_proche("2(3+4)", 14.0);
    assert_proche("2 3", 6.0);
}

#[test]
fn sci_registre_complet_via_pipeline() {
    // chaque nom du registre doit traverser tout le pipeline, chiffres
    // compris (LOG2, LOG10, LOG1P, EXPM1) : seul un hors-domaine est admis
    for f in Fonction::TOUTES {
        let expr = format!("{}(0.5)", f.nom());
        match eval_expression(&expr) {
            Ok(v) => assert!(v.is_finite(), "expr={expr:?} : {v}"),
            Err(ErreurCalc::ResultatInvalide(_)) => {}
            Err(e) => panic!("expr={expr:?} : variante inattendue {e}"),
        }
    }

    // les noms à chiffres avec leurs valeurs de référence
    assert_proche("LOG10(1000)", 3.0);
    assert_proche("LOG2(8)", 3.0);
    assert_proche("EXPM1(0)", 0.0);
    assert_proche("LOG1P(0)", 0.0);
}

#[test]
fn sci_identites_fonctions() {
    // sin² + cos² = 1
    assert_proche("SIN(1)*SIN(1)+COS(1)*COS(1)", 1.0);
    // exp(ln(x)) = x
    assert_proche("EXP(LOG(7))", 7.0);
    // sqrt(x)^2 = x
    assert_proche("SQRT(13)^2", 13.0);
    // cbrt(-...) passe par la négation, pas le littéral signé
    assert_proche("CBRT(-8)", -2.0);
    // log10(1000) = 3, log2(8) = 3
    assert_proche("LOG10(1000)+LOG2(8)", 6.0);
}

#[test]
fn sci_arrondis_et_signe() {
    assert_proche("FLOOR(2.7)", 2.0);
    assert_proche("CEIL(2.2)", 3.0);
    assert_proche("ROUND(2.5)", 3.0);
    assert_proche("TRUNC(-2.7)", -2.0);
    assert_proche("SIGN(-4)", -1.0);
    assert_proche("SIGN(4)", 1.0);
    // le signe de zéro reste zéro
    assert_proche("SIGN(0)", 0.0);
}

/* ------------------------ Taxonomie des erreurs ------------------------ */

#[test]
fn sci_taxonomie_erreurs() {
    let cas: &[(&str, fn(&ErreurCalc) -> bool)] = &[
        (")2+3(", |e| matches!(e, ErreurCalc::ExpressionMalformee(_))),
        ("2++3", |e| matches!(e, ErreurCalc::OperateurInvalide(_))),
        ("2*/3", |e| matches!(e, ErreurCalc::OperateurInvalide(_))),
        ("5 - - 3", |e| matches!(e, ErreurCalc::OperateurInvalide(_))),
        ("2+", |e| matches!(e, ErreurCalc::OperandeManquante(_))),
        ("(2*)", |e| matches!(e, ErreurCalc::OperandeManquante(_))),
        ("", |e| matches!(e, ErreurCalc::ExpressionIllisible(_))),
        ("2&3", |e| matches!(e, ErreurCalc::ExpressionIllisible(_))),
        ("(2+3", |e| matches!(e, ErreurCalc::ParenthesesDesequilibrees)),
        ("2+3)", |e| matches!(e, ErreurCalc::ParenthesesDesequilibrees)),
        ("FOO(1)", |e| matches!(e, ErreurCalc::FonctionInconnue(_))),
        ("5/0", |e| matches!(e, ErreurCalc::ResultatInvalide(_))),
    ];

    for (expr, verifie) in cas {
        match eval_expression(expr) {
            Ok(v) => panic!("expr={expr:?} = {v}, erreur attendue"),
            Err(e) => assert!(verifie(&e), "expr={expr:?} : variante inattendue {e:?}"),
        }
    }
}

#[test]
fn sci_erreurs_de_domaine() {
    // chaque sortie hors R fini doit devenir ResultatInvalide
    for expr in [
        "1/0",
        "0/0",
        "SQRT(0-4)",
        "LOG(0)",
        "LOG(-1)",
        "ASIN(2)",
        "ACOS(-1.5)",
        "ACOSH(0.5)",
        "ATANH(1)",
        "10^1000",
    ] {
        assert!(
            matches!(eval_expression(expr), Err(ErreurCalc::ResultatInvalide(_))),
            "expr={expr:?}"
        );
    }
}

/* ------------------------ Mise en forme ------------------------ */

#[test]
fn sci_format_idempotent() {
    let entrees = [
        "2  +   3",
        "5-3",
        "1-2-3",
        "2 (3+4)",
        "sqrt(16)",
        "2sin(1)",
        ".5+3.",
        "-5+8",
        "3--2",
        "2×3",
        "(1+1)(2+2)",
    ];
    for brut in entrees {
        let une = format_expression(brut).unwrap_or_else(|e| panic!("format({brut:?}) : {e}"));
        let deux = format_expression(&une).unwrap_or_else(|e| panic!("reformat({une:?}) : {e}"));
        assert_eq!(une, deux, "brut={brut:?}");
    }
}

#[test]
fn sci_format_puis_eval_stable() {
    // mettre en forme ne change jamais la valeur
    for brut in ["2  +3*4", "5-3", "2 (3+4)", "3--2", "2 3", "sqrt(16)+1"] {
        let propre = format_expression(brut).unwrap();
        let a = eval_ok(brut);
        let b = eval_ok(&propre);
        assert_eq!(a, b, "brut={brut:?} propre={propre:?}");
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut expr = String::new();
    for k in 0..500 {
        if k > 0 {
            expr.push('+');
        }
        expr.push('1');
        budget(t0, max);
    }

    assert_proche(&expr, 500.0);
}

#[test]
fn sci_stress_imbrication_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // le pipeline est itératif : la profondeur ne consomme pas la pile d'appels
    let mut expr = "5".to_string();
    for _ in 0..200 {
        expr = format!("({expr})");
        budget(t0, max);
    }
    assert_proche(&expr, 5.0);

    // chaîne de fonctions imbriquées
    let mut expr = "256".to_string();
    for _ in 0..3 {
        expr = format!("SQRT({expr})");
    }
    assert_proche(&expr, 2.0);
}
