//! Phenotype interpretation.
//!
//! A genotype is read by an ordered list of rules, one per locus. Each rule
//! looks at the immutable genotype and records what it finds on a [`Coat`];
//! once every rule has run the coat is rendered to text with a [`Labels`]
//! table. Extension (`e/e`) masks the agouti, brown, dilution and merle
//! rules, so those check [`Coat::recessive_red`] before writing anything.

use crate::labels::{Labels, ENGLISH};
use crate::loci;
use crate::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Sable,
    Tricolor,
    Solid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseColor {
    Black,
    Brown,
    Blue,
    Lilac,
}

impl BaseColor {
    /// The color `d/d` turns this one into, if any.
    pub fn diluted(self) -> Option<BaseColor> {
        match self {
            BaseColor::Black => Some(BaseColor::Blue),
            BaseColor::Brown => Some(BaseColor::Lilac),
            BaseColor::Blue | BaseColor::Lilac => None,
        }
    }

    fn label(self, labels: &Labels) -> &'static str {
        match self {
            BaseColor::Black => labels.black,
            BaseColor::Brown => labels.brown,
            BaseColor::Blue => labels.blue,
            BaseColor::Lilac => labels.lilac,
        }
    }
}

/// Amount of white from the piebald allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum White {
    Minimal,
    Moderate,
    Excessive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Alert {
    /// One `M` under recessive red.
    HiddenMerle,
    /// `sp/sp`: deafness and ocular defect risk.
    WhiteHealthRisk,
}

impl Alert {
    pub fn label(self, labels: &Labels) -> &'static str {
        match self {
            Alert::HiddenMerle => labels.hidden_merle_alert,
            Alert::WhiteHealthRisk => labels.white_health_alert,
        }
    }
}

/// What the rules have established about a coat so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coat {
    pub recessive_red: bool,
    pub pattern: Pattern,
    pub base: BaseColor,
    pub merle: bool,
    pub white: White,
    pub alerts: BTreeSet<Alert>,
}

impl Default for Coat {
    fn default() -> Self {
        Self {
            recessive_red: false,
            pattern: Pattern::Solid,
            base: BaseColor::Black,
            merle: false,
            white: White::Minimal,
            alerts: BTreeSet::new(),
        }
    }
}

pub type Rule = fn(&Genotype, &mut Coat);

/// Rules in evaluation order. Later rules may depend on earlier ones.
pub const RULES: [(Locus, Rule); 6] = [
    (Locus::E, extension),
    (Locus::A, agouti),
    (Locus::B, brown),
    (Locus::D, dilution),
    (Locus::M, merle),
    (Locus::S, white_spotting),
];

fn extension(genotype: &Genotype, coat: &mut Coat) {
    if genotype[Locus::E].count(loci::RECESSIVE_RED) == 2 {
        coat.recessive_red = true;
        if genotype[Locus::M].count(loci::MERLE) == 1 {
            coat.alerts.insert(Alert::HiddenMerle);
        }
    }
}

fn agouti(genotype: &Genotype, coat: &mut Coat) {
    if coat.recessive_red {
        return;
    }
    let pair = &genotype[Locus::A];
    coat.pattern = if pair.contains(loci::SABLE) {
        Pattern::Sable
    } else if pair.contains(loci::TAN_POINTS) {
        Pattern::Tricolor
    } else {
        Pattern::Solid
    };
}

fn brown(genotype: &Genotype, coat: &mut Coat) {
    if coat.recessive_red {
        return;
    }
    coat.base = if genotype[Locus::B].count(loci::BROWN) == 2 {
        BaseColor::Brown
    } else {
        BaseColor::Black
    };
}

fn dilution(genotype: &Genotype, coat: &mut Coat) {
    if coat.recessive_red || genotype[Locus::D].count(loci::DILUTE) != 2 {
        return;
    }
    if let Some(diluted) = coat.base.diluted() {
        coat.base = diluted;
    }
}

// M/M never gets here through a cross; it is treated as not merle.
fn merle(genotype: &Genotype, coat: &mut Coat) {
    if coat.recessive_red {
        return;
    }
    coat.merle = genotype[Locus::M].count(loci::MERLE) == 1;
}

fn white_spotting(genotype: &Genotype, coat: &mut Coat) {
    coat.white = match genotype[Locus::S].count(loci::PIEBALD) {
        2 => {
            coat.alerts.insert(Alert::WhiteHealthRisk);
            White::Excessive
        }
        1 => White::Moderate,
        _ => White::Minimal,
    };
}

impl Coat {
    /// Runs every rule over `genotype`.
    pub fn from_genotype(genotype: &Genotype) -> Self {
        let mut coat = Coat::default();
        for (_, rule) in RULES.iter() {
            rule(genotype, &mut coat);
        }
        coat
    }

    /// Color name without the white qualifier.
    pub fn color_name(&self, labels: &Labels) -> String {
        if self.recessive_red {
            return labels.recessive_red.to_owned();
        }
        // Black merle is conventionally called blue merle.
        let merle_base = match self.base {
            BaseColor::Black => labels.blue,
            other => other.label(labels),
        };
        match (self.pattern, self.merle) {
            (Pattern::Sable, true) => format!("{} {}", labels.sable, labels.merle),
            (Pattern::Sable, false) => labels.sable.to_owned(),
            (Pattern::Tricolor, true) => {
                format!("{} {} {}", merle_base, labels.merle, labels.tricolor)
            }
            (Pattern::Tricolor, false) => {
                format!("{} {}", self.base.label(labels), labels.tricolor)
            }
            (Pattern::Solid, true) => format!("{} {}", merle_base, labels.merle),
            (Pattern::Solid, false) => self.base.label(labels).to_owned(),
        }
    }

    pub fn white_label(&self, labels: &Labels) -> &'static str {
        match self.white {
            White::Minimal => labels.minimal_white,
            White::Moderate => labels.moderate_white,
            White::Excessive => labels.excessive_white,
        }
    }

    pub fn render(&self, labels: &Labels) -> Phenotype {
        Phenotype {
            label: format!("{} {}", self.color_name(labels), self.white_label(labels)),
            alerts: self
                .alerts
                .iter()
                .map(|alert| alert.label(labels).to_owned())
                .collect(),
        }
    }
}

/// A named coat and the alerts that come with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phenotype {
    pub label: String,
    pub alerts: BTreeSet<String>,
}

/// Names the coat `genotype` shows, in English.
pub fn interpret(genotype: &Genotype) -> Phenotype {
    interpret_with(genotype, &ENGLISH)
}

pub fn interpret_with(genotype: &Genotype, labels: &Labels) -> Phenotype {
    Coat::from_genotype(genotype).render(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::PORTUGUESE;
    use std::error::Error;

    fn phenotype(genotype: &str) -> Result<Phenotype, Box<dyn Error>> {
        Ok(interpret(&genotype.parse::<Genotype>()?))
    }

    #[test]
    fn test_solid_black() -> Result<(), Box<dyn Error>> {
        let p = phenotype("E:E/E A:a/a B:B/b D:D/D M:m/m S:n/n")?;
        assert_eq!(p.label, "black (minimal white)");
        assert!(p.alerts.is_empty());
        Ok(())
    }

    #[test]
    fn test_recessive_red_masks_other_loci() -> Result<(), Box<dyn Error>> {
        for rest in &[
            "A:Ay/Ay B:b/b D:d/d M:m/m",
            "A:at/a B:B/B D:D/d M:m/m",
            "A:a/a B:B/b D:d/d M:M/m",
        ] {
            let p = phenotype(&format!("E:e/e {} S:n/n", rest))?;
            assert!(p.label.starts_with("recessive red"), "{}", p.label);
            assert!(!p.label.contains("merle"));
        }
        Ok(())
    }

    #[test]
    fn test_hidden_merle_alert_needs_exactly_one_m() -> Result<(), Box<dyn Error>> {
        let one = phenotype("E:e/e A:a/a B:B/B D:D/D M:M/m S:n/n")?;
        assert!(one.alerts.contains(ENGLISH.hidden_merle_alert));

        let none = phenotype("E:e/e A:a/a B:B/B D:D/D M:m/m S:n/n")?;
        assert!(none.alerts.is_empty());

        let two = phenotype("E:e/e A:a/a B:B/B D:D/D M:M/M S:n/n")?;
        assert!(two.alerts.is_empty());
        Ok(())
    }

    #[test]
    fn test_white_qualifier_for_each_s_genotype() -> Result<(), Box<dyn Error>> {
        let base = "E:E/e A:at/a B:b/b D:D/d M:m/m";

        let p = phenotype(&format!("{} S:sp/sp", base))?;
        assert_eq!(p.label, "brown tricolor (excessive white)");
        assert!(p.alerts.contains(ENGLISH.white_health_alert));

        let p = phenotype(&format!("{} S:sp/n", base))?;
        assert_eq!(p.label, "brown tricolor (moderate white)");
        assert!(p.alerts.is_empty());

        let p = phenotype(&format!("{} S:n/n", base))?;
        assert_eq!(p.label, "brown tricolor (minimal white)");
        Ok(())
    }

    #[test]
    fn test_white_qualifier_applies_to_recessive_red() -> Result<(), Box<dyn Error>> {
        let p = phenotype("E:e/e A:a/a B:B/B D:D/D M:m/m S:sp/sp")?;
        assert_eq!(p.label, "recessive red (excessive white)");
        assert!(p.alerts.contains(ENGLISH.white_health_alert));
        Ok(())
    }

    #[test]
    fn test_sable_ignores_base_color() -> Result<(), Box<dyn Error>> {
        assert_eq!(
            phenotype("E:E/E A:Ay/a B:b/b D:d/d M:m/m S:n/n")?.label,
            "sable (minimal white)"
        );
        assert_eq!(
            phenotype("E:E/E A:Ay/at B:B/B D:D/D M:M/m S:n/n")?.label,
            "sable merle (minimal white)"
        );
        Ok(())
    }

    #[test]
    fn test_black_merle_is_called_blue_merle() -> Result<(), Box<dyn Error>> {
        assert_eq!(
            phenotype("E:E/E A:a/a B:B/B D:D/D M:M/m S:n/n")?.label,
            "blue merle (minimal white)"
        );
        assert_eq!(
            phenotype("E:E/E A:at/at B:B/b D:D/d M:M/m S:n/n")?.label,
            "blue merle tricolor (minimal white)"
        );
        Ok(())
    }

    #[test]
    fn test_dilution() -> Result<(), Box<dyn Error>> {
        assert_eq!(
            phenotype("E:E/E A:a/a B:B/b D:d/d M:m/m S:n/n")?.label,
            "blue (minimal white)"
        );
        assert_eq!(
            phenotype("E:E/E A:a/a B:b/b D:d/d M:m/m S:n/n")?.label,
            "lilac (minimal white)"
        );
        assert_eq!(
            phenotype("E:E/E A:at/a B:b/b D:d/d M:M/m S:sp/n")?.label,
            "lilac merle tricolor (moderate white)"
        );
        assert_eq!(
            phenotype("E:E/E A:a/a B:b/b D:D/D M:M/m S:n/n")?.label,
            "brown merle (minimal white)"
        );
        Ok(())
    }

    #[test]
    fn test_dilution_has_no_other_substitutions() {
        assert_eq!(BaseColor::Blue.diluted(), None);
        assert_eq!(BaseColor::Lilac.diluted(), None);
    }

    #[test]
    fn test_double_merle_is_not_named_merle() -> Result<(), Box<dyn Error>> {
        let coat = Coat::from_genotype(&"E:E/E A:a/a B:B/B D:D/D M:M/M S:n/n".parse::<Genotype>()?);
        assert!(!coat.merle);
        Ok(())
    }

    #[test]
    fn test_rules_run_in_locus_order() {
        let order: Vec<Locus> = RULES.iter().map(|(locus, _)| *locus).collect();
        assert_eq!(order, Locus::ALL.to_vec());
    }

    #[test]
    fn test_portuguese_labels() -> Result<(), Box<dyn Error>> {
        let genotype: Genotype = "E:E/E A:a/a B:B/B D:D/D M:M/m S:sp/sp".parse()?;
        let p = interpret_with(&genotype, &PORTUGUESE);
        assert_eq!(p.label, "azul merle (branco excessivo)");
        assert!(p.alerts.contains(PORTUGUESE.white_health_alert));

        let red: Genotype = "E:e/e A:a/a B:B/B D:D/D M:M/m S:n/n".parse()?;
        let p = interpret_with(&red, &PORTUGUESE);
        assert_eq!(p.label, "vermelho australiano (branco mínimo)");
        assert!(p.alerts.contains("Porta merle não visível"));
        Ok(())
    }
}
