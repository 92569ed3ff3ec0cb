// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (JWT bearer auth)
pub mod public;    // POST /api/login
pub mod protected; // /api/contacts/*
