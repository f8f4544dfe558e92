mod in_memory_user_repository_tests;
