// Copyright (C) 2026 KTON SDK Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to .env file (e.g., .env.testnet)
    #[arg(short, long, default_value = ".env")]
    pub env_file: String,

    /// JSON file holding the `get_pool_full_data` stack (a bare array of
    /// records or a tonapi response with a `stack` field)
    #[arg(short, long)]
    pub stack: String,

    /// Cache the decoded snapshot under this TTL in milliseconds
    #[arg(long)]
    pub ttl_ms: Option<u64>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
