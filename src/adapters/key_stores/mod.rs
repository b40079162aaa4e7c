pub mod fixture_key_store;
