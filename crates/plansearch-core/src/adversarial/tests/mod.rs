mod fixtures;
mod tree_search_tests;
