mod property_value_iteration_tests;
