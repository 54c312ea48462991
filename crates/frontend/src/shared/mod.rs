pub mod api_client;
pub mod api_utils;
pub mod code_reservation;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod details;
pub mod export;
pub mod icons;
pub mod list_controller;
pub mod list_provider;
pub mod loading;
pub mod lookups;
pub mod notifications;
pub mod rest_resource;
pub mod theme;
