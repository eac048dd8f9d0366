// src/noyau/fonctions.rs
//
// Registres fermés : opérateurs et fonctions. Deux enums Copy, tables
// figées à la compilation — ajouter une entrée force l'exhaustivité
// partout (match sans _).

/* ------------------------ Opérateurs ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Addition,
    Soustraction,
    Multiplication,
    Division,
    Puissance,
    Negation,
}

impl Operateur {
    /// Précédence de liaison : ^ avant */ avant +- ; la négation unaire
    /// au niveau du moins binaire (-2^2 = -(2^2)).
    pub fn precedence(&self) -> u8 {
        match self {
            Operateur::Puissance => 4,
            Operateur::Multiplication | Operateur::Division => 3,
            Operateur::Addition | Operateur::Soustraction | Operateur::Negation => 2,
        }
    }

    /// Tous associatifs à gauche, sauf la puissance (2^3^2 = 2^(3^2)).
    pub fn associatif_gauche(&self) -> bool {
        !matches!(self, Operateur::Puissance)
    }

    pub fn arite(&self) -> usize {
        match self {
            Operateur::Negation => 1,
            _ => 2,
        }
    }

    pub fn symbole(&self) -> &'static str {
        match self {
            Operateur::Addition => "+",
            Operateur::Soustraction | Operateur::Negation => "-",
            Operateur::Multiplication => "*",
            Operateur::Division => "/",
            Operateur::Puissance => "^",
        }
    }

    /// Forme d'affichage canonique : seule la soustraction binaire
    /// garde ses espaces, la négation reste collée à son opérande.
    pub fn affichage(&self) -> &'static str {
        match self {
            Operateur::Soustraction => " - ",
            _ => self.symbole(),
        }
    }

    /// Applique l'opérateur à ses opérandes en ordre infixe
    /// (args[0] = gauche). L'arité est vérifiée par l'appelant.
    pub fn applique(&self, args: &[f64]) -> f64 {
        match (self, args) {
            (Operateur::Addition, [a, b]) => a + b,
            (Operateur::Soustraction, [a, b]) => a - b,
            (Operateur::Multiplication, [a, b]) => a * b,
            (Operateur::Division, [a, b]) => a / b,
            (Operateur::Puissance, [a, b]) => a.powf(*b),
            (Operateur::Negation, [a]) => -a,
            _ => f64::NAN,
        }
    }
}

/// Appartenance à la table des opérateurs, formes d'affichage
/// espacées admises (" - ", " × ").
pub fn est_operateur(jeton: &str) -> bool {
    matches!(jeton.trim(), "+" | "-" | "*" | "/" | "^" | "×")
}

/* ------------------------ Fonctions ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Expm1,
    Log,
    Log2,
    Log10,
    Log1p,
    Sqrt,
    Cbrt,
    Floor,
    Ceil,
    Round,
    Trunc,
    Sign,
    Abs,
}

impl Fonction {
    /// Table complète, dans l'ordre du menu.
    pub const TOUTES: [Fonction; 26] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Asin,
        Fonction::Acos,
        Fonction::Atan,
        Fonction::Sinh,
        Fonction::Cosh,
        Fonction::Tanh,
        Fonction::Asinh,
        Fonction::Acosh,
        Fonction::Atanh,
        Fonction::Exp,
        Fonction::Expm1,
        Fonction::Log,
        Fonction::Log2,
        Fonction::Log10,
        Fonction::Log1p,
        Fonction::Sqrt,
        Fonction::Cbrt,
        Fonction::Floor,
        Fonction::Ceil,
        Fonction::Round,
        Fonction::Trunc,
        Fonction::Sign,
        Fonction::Abs,
    ];

    pub fn nom(&self) -> &'static str {
        match self {
            Fonction::Sin => "SIN",
            Fonction::Cos => "COS",
            Fonction::Tan => "TAN",
            Fonction::Asin => "ASIN",
            Fonction::Acos => "ACOS",
            Fonction::Atan => "ATAN",
            Fonction::Sinh => "SINH",
            Fonction::Cosh => "COSH",
            Fonction::Tanh => "TANH",
            Fonction::Asinh => "ASINH",
            Fonction::Acosh => "ACOSH",
            Fonction::Atanh => "ATANH",
            Fonction::Exp => "EXP",
            Fonction::Expm1 => "EXPM1",
            Fonction::Log => "LOG",
            Fonction::Log2 => "LOG2",
            Fonction::Log10 => "LOG10",
            Fonction::Log1p => "LOG1P",
            Fonction::Sqrt => "SQRT",
            Fonction::Cbrt => "CBRT",
            Fonction::Floor => "FLOOR",
            Fonction::Ceil => "CEIL",
            Fonction::Round => "ROUND",
            Fonction::Trunc => "TRUNC",
            Fonction::Sign => "SIGN",
            Fonction::Abs => "ABS",
        }
    }

    /// Résolution d'un identifiant (déjà en majuscules) contre la table.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Fonction::TOUTES.iter().copied().find(|f| f.nom() == nom)
    }

    /// Toutes unaires : la grammaire n'a pas de séparateur d'arguments.
    pub fn arite(&self) -> usize {
        1
    }

    /// LOG est le logarithme népérien; LOG2/LOG10 les bases fixes.
    pub fn applique(&self, x: f64) -> f64 {
        match self {
            Fonction::Sin => x.sin(),
            Fonction::Cos => x.cos(),
            Fonction::Tan => x.tan(),
            Fonction::Asin => x.asin(),
            Fonction::Acos => x.acos(),
            Fonction::Atan => x.atan(),
            Fonction::Sinh => x.sinh(),
            Fonction::Cosh => x.cosh(),
            Fonction::Tanh => x.tanh(),
            Fonction::Asinh => x.asinh(),
            Fonction::Acosh => x.acosh(),
            Fonction::Atanh => x.atanh(),
            Fonction::Exp => x.exp(),
            Fonction::Expm1 => x.exp_m1(),
            Fonction::Log => x.ln(),
            Fonction::Log2 => x.log2(),
            Fonction::Log10 => x.log10(),
            Fonction::Log1p => x.ln_1p(),
            Fonction::Sqrt => x.sqrt(),
            Fonction::Cbrt => x.cbrt(),
            Fonction::Floor => x.floor(),
            Fonction::Ceil => x.ceil(),
            Fonction::Round => x.round(),
            Fonction::Trunc => x.trunc(),
            // le signe de zéro reste zéro (signum rendrait ±1)
            Fonction::Sign => {
                if x == 0.0 {
                    x
                } else {
                    x.signum()
                }
            }
            Fonction::Abs => x.abs(),
        }
    }
}

/// Menu ordonné des fonctions supportées.
pub fn noms_fonctions() -> Vec<&'static str> {
    Fonction::TOUTES.iter().map(|f| f.nom()).collect()
}

/* ------------------------ Tests ------------------------ */
