//! Example: scoring review text
//!
//! Shows the built-in lexicon, the cleaning step and the polarity scores
//! with the label each text receives.
//!
//! Run:
//! ```bash
//! cargo run --example score_text
//! ```

use review_sentiment::sentiment::{SentimentLexicon, ValenceLexicon};
use review_sentiment::{TextPreprocessor, ValenceAnalyzer};

fn main() {
    println!("═══════════════════════════════════════════════════════════");
    println!("   Movie Review Sentiment Demo");
    println!("═══════════════════════════════════════════════════════════\n");

    let sample_reviews = [
        "This movie was AMAZING!!! <br> Loved it.",
        "It was okay, nothing special...",
        "Not good. The plot was <i>really</i> terrible.",
        "Slow start, but the ending was absolutely brilliant!",
        "I watched it on a Tuesday.",
    ];

    // ═══════════════════════════════════════════════════════════
    // 1. Lexicon
    // ═══════════════════════════════════════════════════════════
    println!("1️⃣  LEXICON");
    println!("──────────────────────────────────────────────\n");

    let lexicon = ValenceLexicon::new();
    let stats = lexicon.stats();
    println!("Lexicon statistics:");
    println!("  • Words: {}", lexicon.word_count());
    println!("  • Positive words: {}", stats.positive_count);
    println!("  • Negative words: {}", stats.negative_count);
    println!("  • Boosters: {}", stats.booster_count);
    println!("  • Negations: {}", stats.negation_count);

    // ═══════════════════════════════════════════════════════════
    // 2. Cleaning and scoring
    // ═══════════════════════════════════════════════════════════
    println!("\n2️⃣  CLEANING AND SCORING");
    println!("──────────────────────────────────────────────\n");

    let preprocessor = TextPreprocessor::new();
    let analyzer = ValenceAnalyzer::new().with_lexicon(lexicon);

    for review in sample_reviews {
        let clean = preprocessor.preprocess(review);
        let result = analyzer.analyze(&clean);
        let s = result.scores;

        println!("Raw:     {}", review);
        println!("Cleaned: {}", clean);
        println!(
            "Scores:  neg {:.3}  neu {:.3}  pos {:.3}  compound {:+.4}  → {}",
            s.negative, s.neutral, s.positive, s.compound, result.label
        );
        for word in &result.key_words {
            println!("  • {:12} {:+.3}", word.word, word.valence);
        }
        println!();
    }
}
