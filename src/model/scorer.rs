//! Naive Bayes log-likelihood scorer
//!
//! Each gender starts from its prior and accumulates `ln(count / total)` for
//! every character of the name. The two log scores are then normalized with
//! a max-shifted softmax so long names never underflow.

use crate::error::{NGenderError, NGenderResult};
use crate::model::{FrequencyTable, Gender};
use serde::{Deserialize, Serialize};

/// Floor applied to conditional frequencies before taking the log
const MIN_PROBABILITY: f64 = 1e-10;

/// Overall prior mass for each gender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasePriors {
    pub male: f64,
    pub female: f64,
}

impl Default for BasePriors {
    fn default() -> Self {
        Self {
            male: 0.581915415729593,
            female: 0.418084584270407,
        }
    }
}

impl BasePriors {
    pub fn new(male: f64, female: f64) -> NGenderResult<Self> {
        let priors = Self { male, female };
        priors.validate()?;
        Ok(priors)
    }

    pub fn validate(&self) -> NGenderResult<()> {
        for (name, value) in [("male", self.male), ("female", self.female)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(NGenderError::Config(format!(
                    "prior for {name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

/// Normalized outcome of scoring one name
///
/// `prob_male` and `prob_female` are kept unrounded so mode transforms and
/// tie checks see the exact softmax output; `final_prob` is the reported
/// value, rounded to six decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub gender: Gender,
    pub prob_male: f64,
    pub prob_female: f64,
    pub final_prob: f64,
}

impl ScoreResult {
    /// Derive the dominant gender and reported probability from a pair
    pub fn from_pair(prob_male: f64, prob_female: f64) -> Self {
        let (gender, max) = if prob_male > prob_female {
            (Gender::Male, prob_male)
        } else {
            (Gender::Female, prob_female)
        };
        Self {
            gender,
            prob_male,
            prob_female,
            final_prob: round6(max),
        }
    }

    pub fn prob(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.prob_male,
            Gender::Female => self.prob_female,
        }
    }

    /// Exchange which magnitude is attached to which gender
    pub fn swapped(&self) -> Self {
        Self::from_pair(self.prob_female, self.prob_male)
    }
}

/// Scores names against a borrowed frequency table
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    table: &'a FrequencyTable,
    priors: BasePriors,
}

impl<'a> Scorer<'a> {
    pub fn new(table: &'a FrequencyTable, priors: BasePriors) -> Self {
        Self { table, priors }
    }

    /// Log-likelihood of `name` under one gender hypothesis
    pub fn log_likelihood(&self, name: &str, gender: Gender) -> f64 {
        let total = self.table.total(gender) as f64;
        name.chars().fold(self.priors.get(gender).ln(), |acc, ch| {
            let count = self.table.entry_or_fallback(ch).count(gender) as f64;
            let p = count / total;
            acc + if p <= 0.0 { MIN_PROBABILITY } else { p }.ln()
        })
    }

    /// Score a name; callers guarantee it holds at least one character
    pub fn guess(&self, name: &str) -> ScoreResult {
        let log_male = self.log_likelihood(name, Gender::Male);
        let log_female = self.log_likelihood(name, Gender::Female);

        // Softmax
        let max_log = log_male.max(log_female);
        let exp_male = (log_male - max_log).exp();
        let exp_female = (log_female - max_log).exp();
        let prob_male = exp_male / (exp_male + exp_female);

        ScoreResult::from_pair(prob_male, 1.0 - prob_male)
    }
}

/// Round to six decimal places, half away from zero
pub fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> FrequencyTable {
        FrequencyTable::from_value(&json!({
            "王": {"male": 400, "female": 300},
            "伟": {"male": 600, "female": 20},
            "芳": {"male": 8, "female": 310},
            "铁": {"male": 50, "female": 0},
        }))
        .unwrap()
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let table = table();
        let scorer = Scorer::new(&table, BasePriors::default());
        for name in ["王伟", "王芳", "伟芳", "铁", "王王王王王王王王", "张三"] {
            let r = scorer.guess(name);
            assert!((r.prob_male + r.prob_female - 1.0).abs() < 1e-9, "{name}");
            assert!((0.0..=1.0).contains(&r.final_prob));
        }
    }

    #[test]
    fn test_dominant_gender_follows_counts() {
        let table = table();
        let scorer = Scorer::new(&table, BasePriors::default());

        let male = scorer.guess("王伟");
        assert_eq!(male.gender, Gender::Male);
        assert!(male.final_prob > 0.9);
        assert_eq!(male.final_prob, round6(male.prob_male));

        let female = scorer.guess("王芳");
        assert_eq!(female.gender, Gender::Female);
        assert_eq!(female.final_prob, round6(female.prob_female));
    }

    #[test]
    fn test_zero_count_is_floored_not_infinite() {
        let table = table();
        let scorer = Scorer::new(&table, BasePriors::default());
        let female_log = scorer.log_likelihood("铁", Gender::Female);
        assert!(female_log.is_finite());

        let r = scorer.guess("铁铁");
        assert_eq!(r.gender, Gender::Male);
        assert_eq!(r.final_prob, 1.0);
    }

    #[test]
    fn test_unseen_name_driven_by_priors_and_fallback() {
        let table = table();
        let priors = BasePriors::default();
        let scorer = Scorer::new(&table, priors);
        let r = scorer.guess("张三");

        // Each unseen character contributes ln(1/total_g); compute the
        // expected softmax by hand.
        let lm = priors.male.ln() + 2.0 * (1.0 / table.male_total() as f64).ln();
        let lf = priors.female.ln() + 2.0 * (1.0 / table.female_total() as f64).ln();
        let expected = 1.0 / (1.0 + (lf - lm).exp());
        assert!((r.prob_male - expected).abs() < 1e-12);
    }

    #[test]
    fn test_characters_not_bytes() {
        let table = table();
        let scorer = Scorer::new(&table, BasePriors::default());
        let one = scorer.log_likelihood("伟", Gender::Male);
        let prior = BasePriors::default().male.ln();
        let expected = prior + (600.0 / table.male_total() as f64).ln();
        assert!((one - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tie_reports_female() {
        let r = ScoreResult::from_pair(0.5, 0.5);
        assert_eq!(r.gender, Gender::Female);
        assert_eq!(r.final_prob, 0.5);
    }

    #[test]
    fn test_swapped_preserves_max() {
        let r = ScoreResult::from_pair(0.7312345678, 0.2687654322);
        let s = r.swapped();
        assert_eq!(s.gender, Gender::Female);
        assert_eq!(s.final_prob, r.final_prob);
        assert_eq!(s.prob_male, r.prob_female);
    }

    #[test]
    fn test_round6() {
        assert_eq!(round6(0.12345678), 0.123457);
        assert_eq!(round6(0.9999999), 1.0);
        assert_eq!(round6(0.0), 0.0);
    }

    #[test]
    fn test_priors_validation() {
        assert!(BasePriors::new(0.6, 0.4).is_ok());
        assert!(BasePriors::new(0.0, 0.4).is_err());
        assert!(BasePriors::new(0.5, f64::NAN).is_err());
        assert!(BasePriors::new(-1.0, 0.4).is_err());
    }
}
