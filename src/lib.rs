//! hist-vol: Rolling historical volatility for crypto price series
//!
//! This library provides the core components for:
//! - Daily closing prices from a chart API or CSV exports
//! - Log-return, rolling sample standard deviation volatility estimation
//! - Rendering curves to CSV, Parquet or a terminal table
//! - A pipeline over every configured (symbol, window) pair
//! - Structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod feed;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod series;
pub mod telemetry;
