//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l'état de la calculatrice (entrée, aperçu, résultat,
//! Ans, démarche) et offrir des opérations simples (C/AC) sans logique
//! d'affichage ni d'évaluation. La trace `Demarche` vient du noyau,
//! stockée telle quelle (pure donnée).

use crate::noyau::Demarche;

/// Indicateur affiché à la place du résultat quand l'évaluation échoue.
pub const AFFICHAGE_ERREUR: &str = "ERROR";

#[derive(Clone, Debug)]
pub struct Application {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub apercu: String,   // forme canonique de l'entrée, recalculée en continu
    pub resultat: String, // dernier résultat, ou AFFICHAGE_ERREUR
    pub erreur: String,   // détail de la dernière erreur (vide sinon)

    // --- mémoire ---
    pub ans: Option<f64>, // dernier résultat réussi

    // --- démarche (panneau d'explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l'entrée après un clic.
    pub focus_entree: bool,
}

impl Default for Application {
    fn default() -> Self {
        Self {
            entree: String::new(),
            apercu: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            ans: None,
            demarche: Demarche::default(),
            focus_entree: true,
        }
    }
}

impl Application {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultat + Ans).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.apercu.clear();
        self.resultat.clear();
        self.erreur.clear();
        self.ans = None;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// C : effacer seulement l'entrée (résultat et Ans conservés).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.apercu.clear();
        self.focus_entree = true;
    }

    /// Dépose une erreur : l'écran résultat passe à l'indicateur fixe,
    /// la démarche (plus fiable) est coupée. Ans reste intact.
    pub fn set_erreur(&mut self, detail: impl Into<String>) {
        self.resultat = AFFICHAGE_ERREUR.to_string();
        self.erreur = detail.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Dépose un résultat réussi et le mémorise dans Ans.
    pub fn set_resultat(&mut self, valeur: f64, affiche: String, demarche: Demarche) {
        self.resultat = affiche;
        self.erreur.clear();
        self.ans = Some(valeur);
        self.demarche = demarche;
        self.focus_entree = true;
    }
}
