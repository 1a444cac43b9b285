mod property_search_tests;
