mod age_formatter_tests;
mod provider_parsing_tests;
mod response_formatter_tests;
mod username_validator_tests;
