//! Test-only crate. See `tests/` for end-to-end scenarios covering the
//! engine, the console session and the shell loop together.
