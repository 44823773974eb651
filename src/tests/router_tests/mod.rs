mod auth_tests;
mod cart_tests;
mod properties_tests;
