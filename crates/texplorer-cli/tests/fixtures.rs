//! A small program shared by the CLI tests.
//!
//! ```typescript
//! // user.ts
//! interface User { name: string; tags?: string[] }
//! // main.ts
//! const arrayOfStrings: string[];
//! const wrapper: { user: User };
//! const merged: { a: string } & { b: number };
//! ```

use texplorer_checker::{Declaration, DeclarationKind, TypeDatabase, TypeId, TypeStore};
use texplorer_common::{Position, Range, SourceFileLocation};

pub fn span(file: &str, line: u32, start: u32, end: u32) -> SourceFileLocation {
    SourceFileLocation::new(file, Range::new(Position::new(line, start), Position::new(line, end)))
}

pub fn user_location() -> SourceFileLocation {
    span("user.ts", 0, 10, 14)
}

pub fn array_location() -> SourceFileLocation {
    SourceFileLocation::at("main.ts", 0, 8)
}

pub fn wrapper_location() -> SourceFileLocation {
    SourceFileLocation::at("main.ts", 1, 8)
}

pub fn merged_location() -> SourceFileLocation {
    SourceFileLocation::at("main.ts", 2, 8)
}

pub fn sample_store() -> TypeStore {
    let mut store = TypeStore::new();

    let name = store.property("name", TypeId::STRING);
    let tag_list = store.array_of(TypeId::STRING);
    let tags = store.optional_property("tags", tag_list);
    let user = store.interface("User", vec![name, tags], vec![]);
    let user_symbol = store.lookup(user).and_then(|ty| ty.symbol).unwrap();
    store.declare(
        user_symbol,
        Declaration::new(DeclarationKind::Interface, user_location()),
    );

    let strings = store.array_of(TypeId::STRING);
    store.variable("arrayOfStrings", strings, span("main.ts", 0, 6, 20));

    let user_property = store.property("user", user);
    let wrapper = store.object(vec![user_property]);
    store.variable("wrapper", wrapper, span("main.ts", 1, 6, 13));

    let a = store.property("a", TypeId::STRING);
    let left = store.object(vec![a]);
    let b = store.property("b", TypeId::NUMBER);
    let right = store.object(vec![b]);
    let merged = store.intersection(vec![left, right]);
    store.variable("merged", merged, span("main.ts", 2, 6, 12));

    store
}
