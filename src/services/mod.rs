pub mod market_analysis;
