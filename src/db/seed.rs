// Stock study deck, loaded once when the categories table is empty.
// Category and flashcard rows are immutable after this load; the test
// engine's seeded option reconstruction relies on that.

use color_eyre::Result;
use libsql::params;

const CATEGORIES: &[(i32, &str, &str)] = &[
    (1, "SQL", "Database and SQL queries"),
    (2, ".NET", ".NET Framework and C# concepts"),
    (3, "Java", "Java programming language"),
    (4, "JavaScript", "JavaScript and web development"),
    (5, "Python", "Python programming language"),
];

const FLASHCARDS: &[(i32, i32, &str, &str)] = &[
    // SQL
    (1, 1, "What is a PRIMARY KEY?", "A PRIMARY KEY is a column or set of columns that uniquely identifies each row in a table. It cannot contain NULL values."),
    (2, 1, "What is the difference between INNER JOIN and LEFT JOIN?", "INNER JOIN returns only matching rows from both tables. LEFT JOIN returns all rows from the left table and matching rows from the right table (with NULLs for non-matches)."),
    (3, 1, "What is normalization?", "Normalization is the process of organizing data to reduce redundancy and improve data integrity by dividing tables and establishing relationships."),
    (4, 1, "What is an INDEX?", "An INDEX is a database structure that improves the speed of data retrieval operations on a table at the cost of additional storage and slower writes."),
    (5, 1, "What is a FOREIGN KEY?", "A FOREIGN KEY is a column that creates a relationship between two tables by referencing the PRIMARY KEY of another table."),
    (6, 1, "What is a VIEW?", "A VIEW is a virtual table based on a SQL query that can simplify complex queries and provide security by restricting access to specific data."),
    (7, 1, "What is a TRANSACTION?", "A TRANSACTION is a sequence of operations performed as a single logical unit of work that must be completed entirely or not at all (ACID properties)."),
    (8, 1, "What does GROUP BY do?", "GROUP BY groups rows with the same values in specified columns and is often used with aggregate functions like COUNT, SUM, AVG, MAX, MIN."),
    (9, 1, "What is the difference between WHERE and HAVING?", "WHERE filters rows before grouping, while HAVING filters groups after GROUP BY. HAVING is used with aggregate functions."),
    (10, 1, "What is a stored procedure?", "A stored procedure is a prepared SQL code that can be saved and reused, accepting parameters and containing control flow logic."),
    // .NET
    (11, 2, "What is the difference between struct and class in C#?", "Struct is a value type stored on the stack, while class is a reference type stored on the heap. Structs don't support inheritance."),
    (12, 2, "What is async/await in C#?", "async/await is a pattern for asynchronous programming that allows non-blocking execution without explicitly managing threads or callbacks."),
    (13, 2, "What is dependency injection?", "Dependency injection is a design pattern where dependencies are provided to a class rather than the class creating them, improving testability and loose coupling."),
    (14, 2, "What is LINQ?", "LINQ (Language Integrated Query) is a feature in .NET that provides query capabilities directly in C# for collections, databases, and XML."),
    (15, 2, "What is the difference between IEnumerable and IQueryable?", "IEnumerable executes queries in memory (LINQ to Objects), while IQueryable translates to external query language like SQL for deferred execution."),
    (16, 2, "What is middleware in ASP.NET Core?", "Middleware is software assembled into an app pipeline to handle requests and responses. Each component can perform operations before and after the next component."),
    (17, 2, "What is the difference between Task and Thread?", "Thread represents an actual OS thread, while Task is a higher-level abstraction representing an asynchronous operation that may or may not use a thread."),
    (18, 2, "What is garbage collection in .NET?", "Garbage collection is automatic memory management that reclaims memory occupied by objects that are no longer in use by the application."),
    (19, 2, "What is Entity Framework?", "Entity Framework is an ORM (Object-Relational Mapping) framework that enables .NET developers to work with databases using .NET objects."),
    (20, 2, "What are extension methods in C#?", "Extension methods allow adding new methods to existing types without modifying them, using static methods with the 'this' keyword on the first parameter."),
    // Java
    (21, 3, "What is the difference between JDK, JRE, and JVM?", "JVM executes Java bytecode. JRE includes JVM and libraries to run Java apps. JDK includes JRE plus development tools like compiler."),
    (22, 3, "What is the difference between == and .equals()?", "== compares object references (memory addresses), while .equals() compares object values/content based on the overridden implementation."),
    (23, 3, "What is polymorphism in Java?", "Polymorphism allows objects to take multiple forms. Method overriding (runtime) and method overloading (compile-time) are two types."),
    (24, 3, "What is the difference between abstract class and interface?", "Abstract classes can have state and implementation. Interfaces (pre-Java 8) only have method signatures. A class can implement multiple interfaces but extend only one class."),
    (25, 3, "What is a lambda expression?", "Lambda expressions (Java 8+) are anonymous functions that provide a clear and concise way to implement functional interfaces using the arrow (->) syntax."),
    (26, 3, "What is the purpose of the 'final' keyword?", "final makes variables constant, prevents method overriding, and prevents class inheritance depending on where it's applied."),
    (27, 3, "What is a Stream in Java 8?", "Stream is a sequence of elements supporting sequential and parallel aggregate operations, enabling functional-style operations on collections."),
    (28, 3, "What is exception handling in Java?", "Exception handling uses try-catch-finally blocks to handle runtime errors. Checked exceptions must be caught or declared, unchecked exceptions don't."),
    (29, 3, "What is the difference between ArrayList and LinkedList?", "ArrayList uses dynamic array (fast random access, slow insertions). LinkedList uses doubly-linked list (slow random access, fast insertions/deletions)."),
    (30, 3, "What is multithreading in Java?", "Multithreading allows concurrent execution of two or more threads. Can be implemented by extending Thread class or implementing Runnable interface."),
    // JavaScript
    (31, 4, "What is the difference between var, let, and const?", "var is function-scoped and hoisted. let is block-scoped and not hoisted. const is block-scoped, not hoisted, and cannot be reassigned."),
    (32, 4, "What is a closure?", "A closure is a function that has access to variables in its outer (enclosing) lexical scope, even after the outer function has returned."),
    (33, 4, "What is the event loop?", "The event loop handles asynchronous callbacks in JavaScript. It continuously checks the call stack and callback queue, executing queued callbacks when the stack is empty."),
    (34, 4, "What is the difference between == and ===?", "== performs type coercion before comparison. === (strict equality) compares both value and type without coercion."),
    (35, 4, "What are Promises?", "Promises represent eventual completion or failure of an asynchronous operation, providing .then(), .catch(), and .finally() methods."),
    (36, 4, "What is async/await?", "async/await is syntactic sugar over Promises, making asynchronous code look and behave like synchronous code, improving readability."),
    (37, 4, "What is the 'this' keyword?", "this refers to the object that is executing the current function. Its value depends on how the function is called (context)."),
    (38, 4, "What is prototypal inheritance?", "Objects inherit properties and methods from other objects through prototypes. Every object has a prototype object from which it inherits."),
    (39, 4, "What is the difference between map() and forEach()?", "map() creates a new array with transformed elements and returns it. forEach() executes a function for each element but returns undefined."),
    (40, 4, "What is destructuring?", "Destructuring is syntax for unpacking values from arrays or properties from objects into distinct variables in a concise way."),
    // Python
    (41, 5, "What is the difference between list and tuple?", "Lists are mutable (can be changed) and use square brackets []. Tuples are immutable (cannot be changed) and use parentheses ()."),
    (42, 5, "What is a decorator?", "A decorator is a function that modifies the behavior of another function or class. It uses @decorator syntax and is used for cross-cutting concerns."),
    (43, 5, "What is the difference between deep copy and shallow copy?", "Shallow copy creates a new object but references same nested objects. Deep copy creates a completely independent copy with new nested objects."),
    (44, 5, "What is a generator?", "A generator is a function that uses yield to return values lazily, one at a time, maintaining state between calls. Memory efficient for large sequences."),
    (45, 5, "What is list comprehension?", "List comprehension is a concise syntax for creating lists by applying an expression to each item in an iterable, optionally with filtering."),
    (46, 5, "What is the Global Interpreter Lock (GIL)?", "GIL is a mutex that protects access to Python objects, preventing multiple threads from executing Python bytecode simultaneously."),
    (47, 5, "What are *args and **kwargs?", "*args allows passing variable number of positional arguments. **kwargs allows passing variable number of keyword arguments as a dictionary."),
    (48, 5, "What is the difference between staticmethod and classmethod?", "staticmethod doesn't receive implicit first argument. classmethod receives the class as the first argument (cls). Both don't need an instance."),
    (49, 5, "What is a lambda function?", "Lambda is an anonymous function defined with lambda keyword. It's a one-line function that can have multiple arguments but only one expression."),
    (50, 5, "What is the difference between .py and .pyc files?", ".py files contain Python source code. .pyc files contain compiled bytecode for faster loading. Python creates .pyc automatically in __pycache__."),
];

pub async fn seed_study_deck(conn: &libsql::Connection) -> Result<()> {
    let already_seeded = conn
        .query("SELECT 1 FROM categories LIMIT 1", ())
        .await?
        .next()
        .await?
        .is_some();

    if already_seeded {
        return Ok(());
    }

    for (id, name, description) in CATEGORIES {
        conn.execute(
            "INSERT INTO categories (id, name, description) VALUES (?, ?, ?)",
            params![*id, *name, *description],
        )
        .await?;
    }

    for (id, category_id, question, answer) in FLASHCARDS {
        conn.execute(
            "INSERT INTO flashcards (id, question, answer, category_id) VALUES (?, ?, ?, ?)",
            params![*id, *question, *answer, *category_id],
        )
        .await?;
    }

    tracing::info!(
        "seeded study deck: {} categories, {} flashcards",
        CATEGORIES.len(),
        FLASHCARDS.len()
    );
    Ok(())
}
