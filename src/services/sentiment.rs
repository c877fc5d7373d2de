use crate::models::{Article, SentimentLabel, SentimentResult};

/// Lexicon weight for a single lowercase token. Unknown tokens weigh zero.
/// Strong financial signals carry weight ±2, milder ones ±1.
fn term_weight(token: &str) -> i64 {
    match token {
        // Strongly positive
        "surge" | "surges" | "surged" | "soar" | "soars" | "soared" | "rally"
        | "rallies" | "rallied" | "breakout" | "record" | "outperform"
        | "outperforms" | "skyrocket" | "skyrockets" | "blockbuster" => 2,

        // Positive
        "gain" | "gains" | "gained" | "beat" | "beats" | "growth" | "grow"
        | "grows" | "profit" | "profits" | "profitable" | "upgrade" | "upgrades"
        | "upgraded" | "bullish" | "strong" | "stronger" | "win" | "wins"
        | "jump" | "jumps" | "jumped" | "boost" | "boosts" | "boosted" | "rise"
        | "rises" | "rose" | "climb" | "climbs" | "climbed" | "positive"
        | "upside" | "robust" | "momentum" | "dividend" | "expand" | "expands"
        | "expanded" | "recovery" | "rebound" | "optimistic" | "success"
        | "successful" | "exceed" | "exceeds" | "exceeded" | "catalyst" => 1,

        // Strongly negative
        "plunge" | "plunges" | "plunged" | "crash" | "crashes" | "crashed"
        | "collapse" | "collapses" | "collapsed" | "tumble" | "tumbles"
        | "tumbled" | "bankruptcy" | "bankrupt" | "fraud" | "scandal"
        | "lawsuit" | "underperform" | "underperforms" => -2,

        // Negative
        "loss" | "losses" | "lose" | "loses" | "lost" | "miss" | "misses"
        | "missed" | "decline" | "declines" | "declined" | "downgrade"
        | "downgrades" | "downgraded" | "bearish" | "weak" | "weaker" | "fall"
        | "falls" | "fell" | "drop" | "drops" | "dropped" | "slump" | "slumps"
        | "slumped" | "cut" | "cuts" | "negative" | "risk" | "risks" | "fear"
        | "fears" | "concern" | "concerns" | "warning" | "warns" | "layoff"
        | "layoffs" | "selloff" | "probe" | "investigation" | "penalties"
        | "recession" | "downturn" | "disappointing" | "setback" | "shrinking"
        | "tumbling" | "volatile" | "uncertainty" => -1,

        _ => 0,
    }
}

/// Derive a three-way label from the comparative (length-normalized) score.
/// The ±0.5 thresholds are exclusive: a single strong keyword can tip a short
/// headline, but one positive word buried in a long passage stays neutral.
pub fn classify_comparative(comparative: f64) -> SentimentLabel {
    if comparative > 0.5 {
        SentimentLabel::Positive
    } else if comparative < -0.5 {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Score free text against the financial sentiment lexicon.
///
/// Tokenizes case-insensitively on non-letter boundaries; unmatched tokens
/// contribute zero. Empty or letter-free input scores exactly
/// `{score: 0, comparative: 0, label: neutral}`. Never fails.
pub fn analyze_sentiment(text: &str) -> SentimentResult {
    let lowered = text.to_lowercase();

    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return SentimentResult::neutral();
    }

    let score: i64 = tokens.iter().map(|t| term_weight(t)).sum();
    let comparative = score as f64 / tokens.len() as f64;

    SentimentResult {
        score,
        comparative,
        label: classify_comparative(comparative),
    }
}

/// Aggregate label for a result set, used for the persistent cache row.
/// Negative news weighs heavier than positive, mirroring how readers react.
pub fn overall_sentiment(articles: &[Article]) -> SentimentLabel {
    if articles.is_empty() {
        return SentimentLabel::Neutral;
    }

    let mut positive = 0usize;
    let mut negative = 0usize;

    for article in articles {
        match article.sentiment_label {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Negative => negative += 1,
            SentimentLabel::Neutral => {}
        }
    }

    if negative > positive {
        SentimentLabel::Negative
    } else if positive > negative * 2 && positive > 0 {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_exactly_neutral() {
        let result = analyze_sentiment("");
        assert_eq!(result.score, 0);
        assert_eq!(result.comparative, 0.0);
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[test]
    fn whitespace_and_symbols_only_is_neutral() {
        let result = analyze_sentiment("   \t\n 123 $%&! 456 ");
        assert_eq!(result, SentimentResult::neutral());
    }

    #[test]
    fn never_panics_on_non_latin_input() {
        for text in ["株価が急騰", "🚀🚀🚀", "Акции выросли", "ß∂ƒ©˙∆˚"] {
            let result = analyze_sentiment(text);
            assert!(matches!(
                result.label,
                SentimentLabel::Positive | SentimentLabel::Neutral | SentimentLabel::Negative
            ));
        }
    }

    #[test]
    fn comparative_thresholds_are_exclusive_at_half() {
        assert_eq!(classify_comparative(0.6), SentimentLabel::Positive);
        assert_eq!(classify_comparative(-0.6), SentimentLabel::Negative);
        assert_eq!(classify_comparative(0.4), SentimentLabel::Neutral);
        assert_eq!(classify_comparative(-0.4), SentimentLabel::Neutral);
        assert_eq!(classify_comparative(0.5), SentimentLabel::Neutral);
        assert_eq!(classify_comparative(-0.5), SentimentLabel::Neutral);
    }

    #[test]
    fn strong_keyword_tips_a_short_headline() {
        // "shares surge" -> score 2 over 2 tokens -> comparative 1.0
        let result = analyze_sentiment("Shares surge");
        assert!(result.comparative > 0.5);
        assert_eq!(result.label, SentimentLabel::Positive);
    }

    #[test]
    fn long_mixed_text_stays_neutral() {
        let result = analyze_sentiment(
            "The company reported earnings for the quarter and management \
             discussed the outlook for the coming year with a modest gain",
        );
        assert_eq!(result.label, SentimentLabel::Neutral);
        assert!(result.score > 0);
    }

    #[test]
    fn negative_headline_is_negative() {
        // "stock plunges" -> -2 over 2 tokens -> comparative -1.0
        let result = analyze_sentiment("Stock plunges");
        assert_eq!(result.label, SentimentLabel::Negative);
        assert!(result.score < 0);
    }

    #[test]
    fn tokenization_splits_on_punctuation() {
        let a = analyze_sentiment("surge,surge;surge");
        assert_eq!(a.score, 6);
        assert_eq!(a.comparative, 2.0);
    }
}
