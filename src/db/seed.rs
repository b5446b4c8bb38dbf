//! Fixture data loaded at startup when `seed.enabled` is set.

use chrono::{DateTime, Duration, Utc};

use crate::db::models::{Argument, Debate, Market, Reply, Stance};

pub fn markets() -> Vec<Market> {
    let market = |id: &str, question: &str, category: &str, volume: f64, liquidity: f64| Market {
        id: id.into(),
        question: question.into(),
        category: category.into(),
        outcomes: vec!["Yes".into(), "No".into()],
        volume,
        liquidity,
        resolved: false,
        resolution: None,
    };

    vec![
        market("1", "Will ETH reach $5,000 by Q4 2025?", "Crypto", 1_500_000.0, 500_000.0),
        market("2", "Will AI tokens outperform BTC in 2025?", "AI/Tech", 800_000.0, 300_000.0),
        market("3", "Will Somnia TVL exceed $1B by end of 2025?", "DeFi", 1_200_000.0, 400_000.0),
    ]
}

pub fn debates(now: DateTime<Utc>) -> Vec<Debate> {
    vec![
        Debate {
            id: "1".into(),
            title: "ETH's Path to $5K: Technical Analysis vs Market Sentiment".into(),
            description: "Will ETH reach $5,000 by Q4 2025?".into(),
            market_id: "1".into(),
            market_question: "Will ETH reach $5,000 by Q4 2025?".into(),
            category: "Crypto".into(),
            author: "CryptoAnalyst".into(),
            author_address: "0x1234...5678".into(),
            created_at: now - Duration::hours(2),
            last_activity: now - Duration::minutes(12),
            argument_count: 1,
            upvotes: 45,
            downvotes: 8,
            ai_score: 87,
            stance: Stance::Yes,
            preview: "Looking at the technical indicators and upcoming Ethereum upgrades, I believe we're seeing strong fundamentals that support a $5K target...".into(),
            is_hot: true,
            participants: 1,
            arguments: Vec::new(),
        },
        Debate {
            id: "2".into(),
            title: "AI Token Bubble or Sustainable Growth?".into(),
            description: "Will AI tokens outperform BTC in 2025?".into(),
            market_id: "2".into(),
            market_question: "Will AI tokens outperform BTC in 2025?".into(),
            category: "AI/Tech".into(),
            author: "AIResearcher".into(),
            author_address: "0x9876...4321".into(),
            created_at: now - Duration::hours(4),
            last_activity: now - Duration::hours(1),
            argument_count: 0,
            upvotes: 32,
            downvotes: 15,
            ai_score: 72,
            stance: Stance::No,
            preview: "While AI is revolutionary, the current token valuations seem disconnected from actual utility. Bitcoin's store of value proposition remains stronger...".into(),
            is_hot: false,
            participants: 1,
            arguments: Vec::new(),
        },
        Debate {
            id: "3".into(),
            title: "Somnia's DeFi Ecosystem: Can It Reach $1B TVL?".into(),
            description: "Will Somnia TVL exceed $1B by end of 2025?".into(),
            market_id: "3".into(),
            market_question: "Will Somnia TVL exceed $1B by end of 2025?".into(),
            category: "DeFi".into(),
            author: "DeFiBuilder".into(),
            author_address: "0x5555...7777".into(),
            created_at: now - Duration::hours(6),
            last_activity: now - Duration::minutes(30),
            argument_count: 0,
            upvotes: 67,
            downvotes: 12,
            ai_score: 91,
            stance: Stance::Yes,
            preview: "Somnia's sub-second finality and 1M+ TPS create unprecedented opportunities for DeFi innovation. The infrastructure is ready for massive adoption...".into(),
            is_hot: true,
            participants: 1,
            arguments: Vec::new(),
        },
    ]
}

pub fn arguments(now: DateTime<Utc>) -> Vec<Argument> {
    vec![Argument {
        id: "a-1".into(),
        debate_id: "1".into(),
        author: "CryptoAnalyst".into(),
        author_address: "0x1234...5678".into(),
        content: "Looking at the technical indicators and upcoming Ethereum upgrades, I believe we're seeing strong fundamentals that support a $5K target. The current consolidation phase is healthy and we're building a solid base for the next leg up.".into(),
        stance: Stance::Yes,
        timestamp: now - Duration::hours(2),
        upvotes: 23,
        downvotes: 3,
        ai_score: 87,
        ai_analysis: "Strong technical analysis with clear reasoning. Considers both fundamentals and market psychology.".into(),
        replies: Vec::new(),
        is_highlighted: true,
    }]
}

pub fn replies(now: DateTime<Utc>) -> Vec<Reply> {
    vec![
        Reply {
            id: "r-1".into(),
            argument_id: "a-1".into(),
            author: "MarketBear".into(),
            author_address: "0x9876...4321".into(),
            content: "But what about the macroeconomic headwinds? The Fed's stance on rates could significantly impact crypto prices.".into(),
            timestamp: now - Duration::hours(1),
            upvotes: 8,
            downvotes: 2,
        },
        Reply {
            id: "r-2".into(),
            argument_id: "a-1".into(),
            author: "TechBull".into(),
            author_address: "0x5555...7777".into(),
            content: "Good point about the technicals. The Dencun upgrade is also going to reduce gas fees significantly, which could drive more adoption.".into(),
            timestamp: now - Duration::minutes(45),
            upvotes: 12,
            downvotes: 1,
        },
    ]
}
