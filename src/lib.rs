#![allow(non_snake_case)]

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod form;
pub mod model;
pub mod notification;
pub mod query;
pub mod service;
