// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// - Même Application (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - L'aperçu canonique est recalculé à chaque frame via format_expression;
//   tant que l'entrée ne se met pas en forme, on écho la saisie brute.

use eframe::egui;

use super::etat::Application;
use crate::noyau::{self, est_operateur, noms_fonctions};

impl Application {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice infixe");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Entrée :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: (2+3)*4, 2^3^2, SQRT(16)")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / fonctions / DEL / C), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // Enter évalue, seulement si le champ est focus (évite les
        // déclenchements globaux quand l'utilisateur clique ailleurs).
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.eval_via_noyau();
            self.focus_entree = true;
        }

        // Aperçu vivant : forme canonique de la saisie en cours.
        self.apercu = match noyau::format_expression(&self.entree) {
            Ok(propre) => propre,
            Err(_) => self.entree.clone(),
        };
        ui.add_space(4.0);
        Self::champ_monospace(ui, "apercu_out", &self.apercu, 1);

        ui.add_space(6.0);

        // Actions
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l'entrée", Action::ClearEntree);
            self.bouton_action(ui, "AC", "Remise à zéro totale (Ans compris)", Action::ResetTotal);
            self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
        });

        ui.add_space(8.0);

        // Opérateurs + parenthèses + Ans + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::Paren);
            self.bouton_insert(ui, ")", ")", InsertKind::Paren);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "×", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            // Ans s'insère comme littéral : la grammaire n'a pas de variables
            if ui.add_sized([46.0, 28.0], egui::Button::new("Ans")).clicked() {
                if let Some(v) = self.ans {
                    self.inserer_ans(v);
                }
                self.focus_entree = true;
            }

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.eval_via_noyau();
                self.focus_entree = true;
            }
        });

        ui.add_space(8.0);

        self.ui_pave_numerique(ui);

        ui.add_space(8.0);

        // Menu des fonctions, dans l'ordre du registre
        egui::CollapsingHeader::new("Fonctions")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for nom in noms_fonctions() {
                        let appel = format!("{nom}(");
                        self.bouton_insert(ui, nom, &appel, InsertKind::Func);
                    }
                });
            });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "×", "*", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, "-", "-", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                if ui.add_sized([46.0, 28.0], egui::Button::new("=")).clicked() {
                    self.eval_via_noyau();
                    self.focus_entree = true;
                }
                self.bouton_insert(ui, "+", "+", InsertKind::Op);
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d'un coup un appel de fonction
    /// complet ("SQRT(", "ASINH(", …), sinon un caractère.
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        for nom in noms_fonctions() {
            let appel = format!("{nom}(");
            if self.entree.ends_with(&appel) {
                for _ in 0..appel.len() {
                    self.entree.pop();
                }
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                return;
            }
        }

        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

        if let Some(v) = self.ans {
            ui.add_space(4.0);
            ui.monospace(format!("Ans = {v}"));
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Forme canonique", "demarche_propre", &self.demarche.propre);
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule stable, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::Op => {
                // pas deux opérateurs de suite : le précédent est remplacé
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if self
                    .entree
                    .chars()
                    .last()
                    .is_some_and(|c| est_operateur(&c.to_string()))
                {
                    self.entree.pop();
                    while self.entree.ends_with(' ') {
                        self.entree.pop();
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Paren | InsertKind::Digit => {
                self.entree.push_str(to_insert);
            }
            InsertKind::Func => {
                // "2SQRT(" reste lisible : la multiplication implicite s'en charge
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    fn inserer_ans(&mut self, valeur: f64) {
        if valeur < 0.0 {
            // parenthésé pour rester neutre vis-à-vis de l'opérateur à gauche
            self.entree.push_str(&format!("({valeur})"));
        } else {
            self.entree.push_str(&format!("{valeur}"));
        }
    }

    /// Évalue l'entrée via le noyau, puis dépose résultat + démarche.
    fn eval_via_noyau(&mut self) {
        match noyau::eval_detaille(&self.entree) {
            Ok((valeur, demarche)) => {
                self.set_resultat(valeur, format!("{valeur}"), demarche);
            }
            Err(e) => {
                self.set_erreur(e.to_string());
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Func,
    Op,
    Paren,
}
