mod side_property_tests;
