//! HUD and end-panel text

use crate::settings::Locale;
use crate::sim::Outcome;

/// Localized label set
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub locale: Locale,
}

impl Labels {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn score(&self, score: u32) -> String {
        match self.locale {
            Locale::Portuguese => format!("Pontos: {score}"),
            Locale::English => format!("Score: {score}"),
        }
    }

    pub fn remaining(&self, seconds: u32) -> String {
        match self.locale {
            Locale::Portuguese => format!("Tempo Restante: {seconds}s"),
            Locale::English => format!("Time Left: {seconds}s"),
        }
    }

    pub fn outcome(&self, outcome: Outcome) -> &'static str {
        match (self.locale, outcome) {
            (Locale::Portuguese, Outcome::Win) => "Ganhou! 😊",
            (Locale::Portuguese, Outcome::Lose) => "Perdeu! 😢",
            (Locale::English, Outcome::Win) => "You won! 😊",
            (Locale::English, Outcome::Lose) => "You lost! 😢",
        }
    }

    /// Best-score line on the end panel
    pub fn best(&self, best: Option<u32>) -> String {
        let best = best.unwrap_or(0);
        match self.locale {
            Locale::Portuguese => format!("Recorde: {best}"),
            Locale::English => format!("Best: {best}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_labels() {
        let labels = Labels::new(Locale::Portuguese);
        assert_eq!(labels.score(7), "Pontos: 7");
        assert_eq!(labels.remaining(12), "Tempo Restante: 12s");
        assert_eq!(labels.outcome(Outcome::Win), "Ganhou! 😊");
        assert_eq!(labels.outcome(Outcome::Lose), "Perdeu! 😢");
    }

    #[test]
    fn test_english_labels() {
        let labels = Labels::new(Locale::English);
        assert_eq!(labels.score(0), "Score: 0");
        assert_eq!(labels.remaining(30), "Time Left: 30s");
        assert_eq!(labels.best(None), "Best: 0");
    }
}
