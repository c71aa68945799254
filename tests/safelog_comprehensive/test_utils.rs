//! Shared fixtures

use safelog::{Fault, HostValue, Object, Value};

/// A fine record the way the client app shapes it
pub fn fine_record(id: i64, amount: i64) -> Object {
    let fine = Object::new();
    fine.set("id", id);
    fine.set("plate", "KA-01-1234");
    fine.set("amount", amount);
    fine.set("paid", false);
    fine
}

/// A user owning `fines`, with each fine pointing back at the user
pub fn user_with_fines(count: i64) -> Object {
    let user = Object::from_entries([("email", "driver@example.com")]);
    let fines: Vec<Value> = (0..count)
        .map(|i| {
            let fine = fine_record(i, 100 + i);
            fine.set("owner", user.clone());
            Value::Object(fine)
        })
        .collect();
    user.set("fines", fines);
    user
}

/// Host whose getters always throw and which cannot be coerced either
pub struct RevokedProxy;

impl HostValue for RevokedProxy {
    fn type_name(&self) -> &str {
        "Proxy"
    }

    fn to_value(&self) -> Result<Value, Fault> {
        Err(Fault::accessor("target", "proxy revoked"))
    }

    fn coerce(&self) -> Result<String, Fault> {
        Err(Fault::accessor("toString", "proxy revoked"))
    }
}

/// Break the owner back-edges so the graph can be freed
pub fn release(user: &Object) {
    if let Some(Value::Array(fines)) = user.get("fines") {
        for fine in fines.read().iter() {
            if let Value::Object(fine) = fine {
                fine.remove("owner");
            }
        }
    }
    user.clear();
}
