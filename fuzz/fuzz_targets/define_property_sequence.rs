#![no_main]

use descriptor_engine::{DescriptorFields, JsValue, ObjectHandle, PropertyDescriptor, Realm};
use libfuzzer_sys::fuzz_target;

const MAX_OPS: usize = 128;
const KEYS: [&str; 4] = ["a", "b", "0", "length"];

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut realm = Realm::new();
    let getter = realm.create_function("get", |_, _, _| Ok(JsValue::from(7)));
    let setter = realm.create_function("set", |_, _, _| Ok(JsValue::Undefined));
    let functions = [None, Some(getter), Some(setter)];
    let proto = realm.new_object();
    let objects = [proto, realm.create_object(Some(proto)).unwrap_or(proto)];
    if byte(data, 0) & 1 == 1 {
        let _ = realm.set_prototype_of(proto, Some(objects[1]));
    }

    for step in data.chunks(4).take(MAX_OPS) {
        let object = objects[usize::from(byte(step, 1)) % objects.len()];
        let key = KEYS[usize::from(byte(step, 2)) % KEYS.len()];
        let before = own(&realm, object, key);

        match byte(step, 0) % 5 {
            0 => {
                let fields = fields(step, &functions);
                let result = realm.define_own_property(object, key, fields);
                if result.is_err() {
                    assert_eq!(own(&realm, object, key), before, "rejected define mutated {key}");
                }
            }
            1 => {
                let _ = realm.put_value(object, key, i32::from(byte(step, 3)));
            }
            2 => {
                let _ = realm.delete_own(object, key);
            }
            3 => {
                let _ = realm.get_value(object, key);
                let _ = realm.enumerate_keys(object);
            }
            _ => {
                let _ = realm.prevent_extensions(object);
            }
        }

        if let Some(PropertyDescriptor::Data {
            value,
            writable: false,
            configurable: false,
            ..
        }) = &before
        {
            let after = own(&realm, object, key);
            let Some(PropertyDescriptor::Data { value: now, .. }) = after else {
                panic!("frozen property {key} changed shape");
            };
            assert!(now.same_value(value), "frozen property {key} changed value");
        }
    }

    for event in realm.drain_events() {
        let _ = serde_json::to_string(&event);
    }
});

fn own(realm: &Realm, object: ObjectHandle, key: &str) -> Option<PropertyDescriptor> {
    realm.get_own_property_descriptor(object, key).ok().flatten()
}

fn fields(step: &[u8], functions: &[Option<ObjectHandle>; 3]) -> DescriptorFields {
    let flags = byte(step, 3);
    let mut fields = DescriptorFields::new();
    if flags & 0x01 != 0 {
        fields.value = Some(JsValue::from(i32::from(flags >> 4)));
    }
    if flags & 0x02 != 0 {
        fields.writable = Some(flags & 0x20 != 0);
    }
    if flags & 0x04 != 0 {
        fields.get = Some(functions[usize::from(flags >> 5) % functions.len()]);
    }
    if flags & 0x08 != 0 {
        fields.set = Some(functions[usize::from(flags >> 6) % functions.len()]);
    }
    if flags & 0x10 != 0 {
        fields.enumerable = Some(flags & 0x40 != 0);
    }
    if byte(step, 1) & 0x80 != 0 {
        fields.configurable = Some(flags & 0x80 != 0);
    }
    fields
}

fn byte(data: &[u8], index: usize) -> u8 {
    if data.is_empty() {
        return 0;
    }
    data[index % data.len()]
}
