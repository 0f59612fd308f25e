//! Display vocabulary, one `Labels` table per `Language`.

use crate::error::UnknownLanguage;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "en")]
    English,
    /// Brazilian Portuguese, following CBKC color naming.
    #[serde(alias = "pt")]
    Portuguese,
}

impl Language {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::English => &ENGLISH,
            Language::Portuguese => &PORTUGUESE,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Portuguese => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "pt" | "pt-br" | "portuguese" => Ok(Language::Portuguese),
            _ => Err(UnknownLanguage(s.to_owned())),
        }
    }
}

/// Every user-facing string of one language.
#[derive(Debug)]
pub struct Labels {
    pub recessive_red: &'static str,
    pub sable: &'static str,
    pub tricolor: &'static str,
    pub merle: &'static str,
    pub black: &'static str,
    pub brown: &'static str,
    pub blue: &'static str,
    pub lilac: &'static str,

    pub minimal_white: &'static str,
    pub moderate_white: &'static str,
    pub excessive_white: &'static str,

    pub hidden_merle_alert: &'static str,
    pub white_health_alert: &'static str,

    pub carrier_prefix: &'static str,
    pub agouti_carrier: &'static str,
    pub brown_carrier: &'static str,
    pub dilution_carrier: &'static str,

    pub double_merle_blocked: &'static str,
    pub merle_by_merle_blocked: &'static str,
}

pub static ENGLISH: Labels = Labels {
    recessive_red: "recessive red",
    sable: "sable",
    tricolor: "tricolor",
    merle: "merle",
    black: "black",
    brown: "brown",
    blue: "blue",
    lilac: "lilac",

    minimal_white: "(minimal white)",
    moderate_white: "(moderate white)",
    excessive_white: "(excessive white)",

    hidden_merle_alert: "Carries merle that is not visible (hidden under recessive red)",
    white_health_alert: "Increased risk of deafness/ocular defects",

    carrier_prefix: "carrier",
    agouti_carrier: "Agouti(A)",
    brown_carrier: "brown",
    dilution_carrier: "dilution",

    double_merle_blocked: "Cross blocked: one of the parents is double merle (M/M). \
        Crossing a double merle is not allowed.",
    merle_by_merle_blocked: "Cross blocked: merle × merle (both M/_). \
        This cross can produce double merle (M/M) puppies.",
};

pub static PORTUGUESE: Labels = Labels {
    recessive_red: "vermelho australiano",
    sable: "sable",
    tricolor: "tricolor",
    merle: "merle",
    black: "preto",
    brown: "marrom",
    blue: "azul",
    lilac: "lilac",

    minimal_white: "(branco mínimo)",
    moderate_white: "(branco moderado)",
    excessive_white: "(branco excessivo)",

    hidden_merle_alert: "Porta merle não visível",
    white_health_alert: "Risco aumentado de surdez/alterações oculares",

    carrier_prefix: "portador",
    agouti_carrier: "Agouti(A)",
    brown_carrier: "marrom",
    dilution_carrier: "diluição",

    double_merle_blocked: "Cruzamento bloqueado: um dos pais é duplo merle (M/M). \
        O app não permite cruzar duplo merle.",
    merle_by_merle_blocked: "Cruzamento bloqueado: merle × merle (ambos M/_). \
        O app bloqueia porque pode produzir filhotes duplo merle (M/M).",
};
