pub mod build_token;
