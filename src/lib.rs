// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Haavi Banner Prober Library
 * Exposes prober modules for testing
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod config;
pub mod engine;
pub mod extract;
pub mod filter;
pub mod http_client;
pub mod output;
pub mod probe;
pub mod response;
pub mod targets;
pub mod types;

// Production error handling and resilience modules
pub mod errors;
pub mod retry;
