mod me_test;
