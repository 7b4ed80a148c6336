use echo_schnorr::{
    Schnorr, Signature,
    fun::{XOnly, hex},
};

static BIP340_CSV: &str = include_str!("./bip340-test-vectors.csv");

struct Row<'a> {
    index: &'a str,
    secret_key: &'a str,
    public_key: &'a str,
    aux_rand: &'a str,
    message: &'a str,
    signature: &'a str,
    valid: bool,
}

fn rows() -> impl Iterator<Item = Row<'static>> {
    BIP340_CSV
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split(',').collect();
            Row {
                index: fields[0],
                secret_key: fields[1],
                public_key: fields[2],
                aux_rand: fields[3],
                message: fields[4],
                signature: fields[5],
                valid: fields[6] == "TRUE",
            }
        })
}

#[test]
fn csv_has_every_row() {
    assert_eq!(rows().count(), 19);
    assert_eq!(rows().filter(|row| !row.secret_key.is_empty()).count(), 8);
}

#[test]
fn signing_test_vectors() {
    for row in rows().filter(|row| !row.secret_key.is_empty()) {
        let secret_key = hex::decode_array::<32>(row.secret_key).unwrap();
        let keypair = Schnorr.derive_xonly_key(secret_key).unwrap();
        assert_eq!(
            keypair.public_key().into_bytes(),
            hex::decode_array::<32>(row.public_key).unwrap(),
            "public key of row {}",
            row.index
        );
        let aux_rand = hex::decode(row.aux_rand).unwrap();
        let message = hex::decode(row.message).unwrap();
        let signature = Schnorr.sign(&keypair, &message, Some(&aux_rand[..])).unwrap();
        assert_eq!(
            signature.to_bytes(),
            hex::decode_array::<64>(row.signature).unwrap(),
            "signature of row {}",
            row.index
        );
    }
}

#[test]
fn verification_test_vectors() {
    for row in rows() {
        let public_key = hex::decode(row.public_key).unwrap();
        let message = hex::decode(row.message).unwrap();
        let signature = hex::decode(row.signature).unwrap();
        assert_eq!(
            Schnorr.verify(&public_key, &message, &signature),
            row.valid,
            "row {}",
            row.index
        );
    }
}

#[test]
fn parse_agrees_with_verify_on_encoding_failures() {
    for row in rows() {
        let public_key = hex::decode_array::<32>(row.public_key).unwrap();
        let signature = hex::decode_array::<64>(row.signature).unwrap();
        match row.index {
            // public key not on the curve, or not below p
            "5" | "14" => assert_eq!(XOnly::from_bytes(public_key), None),
            // r = p, and s = n
            "12" | "13" => assert_eq!(Signature::from_bytes(signature), None),
            _ => assert!(XOnly::from_bytes(public_key).is_some()),
        }
    }
}
