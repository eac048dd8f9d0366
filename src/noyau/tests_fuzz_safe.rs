//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - une expression bien formée évalue, ou échoue ResultatInvalide
//!   (division par zéro, dépassement, hors domaine) — jamais autrement
//! - les expressions plates + - * / sont confrontées à un évaluateur
//!   de référence indépendant (deux passes sur la liste d'opérandes)

use std::time::{Duration, Instant};

use super::{eval_expression, format_expression, ErreurCalc};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(9);
    if rng.coin() {
        format!("{n}")
    } else {
        format!("{n}.{}", rng.pick(10))
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(10) {
        0 => gen_nombre(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({}^{})", gen_nombre(rng), gen_nombre(rng)),
        6 => format!("(-{})", gen_expr(rng, depth - 1)),
        7 => format!("SIN({})", gen_expr(rng, depth - 1)),
        8 => format!("COS({})", gen_expr(rng, depth - 1)),
        _ => format!("SQRT(ABS({}))", gen_expr(rng, depth - 1)),
    }
}

/* ------------------------ Référence plate + - * / ------------------------ */

/// Évaluateur indépendant pour "v0 op v1 op v2 …" sans parenthèses :
/// première passe * et /, seconde passe + et -, de gauche à droite.
fn eval_reference(valeurs: &[f64], ops: &[char]) -> f64 {
    let mut vals: Vec<f64> = vec![valeurs[0]];
    let mut restants: Vec<char> = Vec::new();

    for (k, &op) in ops.iter().enumerate() {
        let v = valeurs[k + 1];
        match op {
            '*' => *vals.last_mut().unwrap() *= v,
            '/' => *vals.last_mut().unwrap() /= v,
            _ => {
                restants.push(op);
                vals.push(v);
            }
        }
    }

    let mut acc = vals[0];
    for (k, &op) in restants.iter().enumerate() {
        let v = vals[k + 1];
        if op == '+' {
            acc += v;
        } else {
            acc -= v;
        }
    }
    acc
}

fn proche(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_bien_forme_evalue_ou_hors_domaine() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        match eval_expression(&expr) {
            Ok(v) => {
                assert!(v.is_finite(), "expr={expr:?} : valeur non finie {v}");
                seen_ok += 1;
            }
            // une expression bien formée ne peut échouer QUE hors domaine
            Err(ErreurCalc::ResultatInvalide(_)) => seen_err += 1,
            Err(e) => panic!("erreur non attendue: expr={expr:?} err={e}"),
        }
    }

    // On veut voir surtout des succès, sinon le fuzz ne balaye rien.
    assert!(seen_ok > 100, "trop peu de succès: {seen_ok}");
    let _ = seen_err;
}

#[test]
fn fuzz_safe_plat_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..150 {
        budget(t0, max);

        let n = 2 + rng.pick(6) as usize;
        let mut valeurs: Vec<f64> = Vec::with_capacity(n);
        let mut ops: Vec<char> = Vec::with_capacity(n - 1);
        let mut expr = String::new();

        for k in 0..n {
            if k > 0 {
                let op = match rng.pick(4) {
                    0 => '+',
                    1 => '-',
                    2 => '*',
                    _ => '/',
                };
                ops.push(op);
                expr.push(op);
            }
            // dénominateurs littéraux jamais nuls
            let v = 1 + rng.pick(9);
            valeurs.push(f64::from(v));
            expr.push_str(&v.to_string());
        }

        let attendu = eval_reference(&valeurs, &ops);
        let obtenu =
            eval_expression(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert!(
            proche(obtenu, attendu),
            "expr={expr:?} : {obtenu} ≠ {attendu}"
        );
    }
}

#[test]
fn fuzz_safe_format_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xFEED_u64);

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let une =
            format_expression(&expr).unwrap_or_else(|e| panic!("format({expr:?}) : {e}"));
        let deux =
            format_expression(&une).unwrap_or_else(|e| panic!("reformat({une:?}) : {e}"));
        assert_eq!(une, deux, "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_format_preserve_la_valeur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let mut rng = Rng::new(0xD1CE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let propre = format_expression(&expr)
            .unwrap_or_else(|e| panic!("format({expr:?}) : {e}"));

        match (eval_expression(&expr), eval_expression(&propre)) {
            (Ok(a), Ok(b)) => assert!(proche(a, b), "expr={expr:?} : {a} ≠ {b}"),
            (Err(a), Err(b)) => assert_eq!(
                std::mem::discriminant(&a),
                std::mem::discriminant(&b),
                "expr={expr:?}"
            ),
            (a, b) => panic!("expr={expr:?} : divergence {a:?} / {b:?}"),
        }
    }
}
