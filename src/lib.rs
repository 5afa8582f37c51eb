//! Nurse rostering engine.
//!
//! Builds a complete constraint model for one monthly roster period:
//! expands shift templates into a dated instance sequence, classifies raw
//! request rules into typed kinds, derives reusable index bundles, and
//! translates every hard and soft rule into primitive solver constructs —
//! boolean/integer variables, linear (in)equalities, reified implications
//! and a weighted minimization objective. Search itself stays behind the
//! opaque [`cp::CpSolver`] boundary; the builder decodes the returned
//! assignment into a roster.
//!
//! # Modules
//!
//! - **`models`**: domain types — `ShiftType`/`ShiftInstance`, `Nurse`,
//!   `RosterRule`/`RuleKind`, `Roster`
//! - **`calendar`**: month expansion and the slot-label vocabulary
//! - **`bundles`**: derived index groupings (day, week, label sequence,
//!   transition pairs, streak windows)
//! - **`cp`**: constraint model IR, solver boundary, reference solver
//! - **`constraints`**: the hard and soft constraint libraries
//! - **`builder`**: model assembly and roster decode
//! - **`io`**: `;`-delimited flat-file loaders
//! - **`validation`**: pre-build input integrity checks
//!
//! # Pipeline
//!
//! calendar → bundles → {hard, soft} libraries → solver → roster
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - CAO Gehandicaptenzorg 2021-2024 (rest and working-hour rules)

pub mod builder;
pub mod bundles;
pub mod calendar;
pub mod constraints;
pub mod cp;
pub mod io;
pub mod models;
pub mod validation;
