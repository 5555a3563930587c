//! Unit tests for the WooCommerce HTTP client.
