//! # Ensaluti
//!
//! `ensaluti` is a small signup and sign-in portal. It serves HTML forms,
//! keeps user records in a MongoDB collection, and checks credentials on
//! sign-in.
//!
//! ## Accounts
//!
//! - **Uniqueness:** usernames and emails are unique, enforced by unique
//!   indexes on the `users` collection. A conflicting signup gets a `400`
//!   from the duplicate-key error of the insert itself, so two concurrent
//!   signups for the same identity cannot both succeed.
//! - **Credentials:** passwords are stored as salted `Argon2id` hashes.
//!   Submitted passwords are wrapped in [`secrecy::SecretString`] so they
//!   never show up in logs or traces.
//! - **Sign-in:** unknown usernames and wrong passwords produce the same
//!   `400 Invalid credentials` response to avoid account enumeration.

pub mod cli;
pub mod ensaluti;
pub mod store;
