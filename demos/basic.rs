use propmatch::{Filter, Properties};

fn main() {
    // Parse an RFC 1960 style filter
    let filter = Filter::parse("(&(objectClass=directory.Person)(|(sn=Jensen)(cn=Babs J*)))")
        .expect("failed to parse filter");

    println!("canonical form: {filter}");
    println!("attributes:     {:?}", filter.attributes());
    println!(
        "object class:   {:?}",
        filter.required_object_class()
    );

    // Match it against a property set
    let props = Properties::new()
        .set("objectClass", "directory.Person")
        .set("cn", "Babs Jensen")
        .set("sn", "Jensen")
        .set("age", 35_i64);

    match filter.matches(&props) {
        Ok(true) => println!("Result: match"),
        Ok(false) => println!("Result: no match"),
        Err(e) => println!("Result: error ({e})"),
    }
}
