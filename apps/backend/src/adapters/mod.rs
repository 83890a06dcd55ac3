//! SeaORM adapters. Functions here speak `DbErr`; repos translate.

pub mod states_sea;
