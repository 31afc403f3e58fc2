//! HTTP implementation of [`shop_core::ShopApi`].

mod client;

pub use client::HttpShopClient;
